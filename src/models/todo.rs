use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating a todo.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoInput {
    /// The name of the todo.
    /// Must be between 1 and 200 characters. Unique per user among live todos
    /// (trimmed comparison, enforced at insert time).
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    /// A description of the todo.
    /// Maximum length of 1000 characters.
    #[validate(length(max = 1000))]
    pub description: String,
}

/// Represents a todo entity as stored in the database and returned by the API.
///
/// Archived rows (soft-deleted via `archived_at`) are filtered out by every
/// query, so the timestamp is not part of the API shape.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Unique identifier for the todo (UUID v4).
    pub id: Uuid,
    /// Identifier of the user who owns the todo.
    pub user_id: Uuid,
    /// The name of the todo.
    pub name: String,
    /// A description of the todo.
    pub description: String,
    /// Whether the todo has been marked completed.
    pub is_completed: bool,
}

/// Query parameters for the name-substring search endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoSearchQuery {
    /// Substring to match against todo names (case-insensitive).
    pub name: Option<String>,
}

/// Request body carrying a single todo id, used by mark-completed and delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoId {
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_input_validation() {
        let valid_input = TodoInput {
            name: "Groceries".to_string(),
            description: "Milk, eggs, bread".to_string(),
        };
        assert!(valid_input.validate().is_ok());

        let empty_name = TodoInput {
            name: "".to_string(),
            description: "Milk, eggs, bread".to_string(),
        };
        assert!(
            empty_name.validate().is_err(),
            "Validation should fail for empty name."
        );

        let long_name = TodoInput {
            name: "a".repeat(201),
            description: "".to_string(),
        };
        assert!(
            long_name.validate().is_err(),
            "Validation should fail for overly long name."
        );

        let long_description = TodoInput {
            name: "Valid name".to_string(),
            description: "b".repeat(1001),
        };
        assert!(
            long_description.validate().is_err(),
            "Validation should fail for overly long description."
        );
    }

    #[test]
    fn test_todo_id_requires_id_field() {
        let parsed: Result<TodoId, _> = serde_json::from_str("{}");
        assert!(parsed.is_err(), "id field must be present");

        let parsed: Result<TodoId, _> =
            serde_json::from_str(r#"{"id": "7f8a1f6e-2f6b-4a83-9c2c-8f4f6a3e9b10"}"#);
        assert!(parsed.is_ok());
    }
}
