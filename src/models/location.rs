use serde::Serialize;

/// A storage location owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
}

impl From<crate::entities::locations::Model> for Location {
    fn from(model: crate::entities::locations::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
        }
    }
}
