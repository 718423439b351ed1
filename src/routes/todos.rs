use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{Todo, TodoId, TodoInput, TodoSearchQuery},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

const TODO_COLUMNS: &str = "id, user_id, name, description, is_completed";

/// Creates a new todo for the authenticated user.
///
/// The trimmed name must be unique among the user's live todos; a duplicate
/// is rejected with 409.
#[post("/create")]
pub async fn create_todo(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    todo_data: web::Json<TodoInput>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT count(id) > 0 FROM todos \
         WHERE name = TRIM($1) AND user_id = $2 AND archived_at IS NULL",
    )
    .bind(&todo_data.name)
    .bind(user.user_id)
    .fetch_one(&**pool)
    .await?;

    if exists {
        return Err(AppError::Conflict("todo already exists".into()));
    }

    sqlx::query(
        "INSERT INTO todos (name, description, user_id) \
         VALUES (TRIM($1), TRIM($2), $3)",
    )
    .bind(&todo_data.name)
    .bind(&todo_data.description)
    .bind(user.user_id)
    .execute(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "todo created successfully"
    })))
}

/// Searches the authenticated user's live todos by name substring
/// (case-insensitive). An empty match set is reported as 404.
#[get("/search")]
pub async fn search_todos(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    query: web::Query<TodoSearchQuery>,
) -> Result<impl Responder, AppError> {
    let name = query.name.clone().unwrap_or_default();

    let sql = format!(
        "SELECT {TODO_COLUMNS} FROM todos \
         WHERE name ILIKE '%' || $1 || '%' AND user_id = $2 AND archived_at IS NULL"
    );
    let todos = sqlx::query_as::<_, Todo>(&sql)
        .bind(name)
        .bind(user.user_id)
        .fetch_all(&**pool)
        .await?;

    if todos.is_empty() {
        return Err(AppError::NotFound("no todos found".into()));
    }

    Ok(HttpResponse::Ok().json(todos))
}

/// Lists all live todos of the authenticated user.
#[get("/all-todos")]
pub async fn all_todos(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let sql = format!(
        "SELECT {TODO_COLUMNS} FROM todos \
         WHERE user_id = $1 AND archived_at IS NULL"
    );
    let todos = sqlx::query_as::<_, Todo>(&sql)
        .bind(user.user_id)
        .fetch_all(&**pool)
        .await?;

    if todos.is_empty() {
        return Err(AppError::NotFound("no todos found".into()));
    }

    Ok(HttpResponse::Ok().json(todos))
}

/// Lists the authenticated user's live todos that are not yet completed.
#[get("/incomplete")]
pub async fn incomplete_todos(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let sql = format!(
        "SELECT {TODO_COLUMNS} FROM todos \
         WHERE user_id = $1 AND is_completed = false AND archived_at IS NULL"
    );
    let todos = sqlx::query_as::<_, Todo>(&sql)
        .bind(user.user_id)
        .fetch_all(&**pool)
        .await?;

    if todos.is_empty() {
        return Err(AppError::NotFound("no todos found".into()));
    }

    Ok(HttpResponse::Ok().json(todos))
}

/// Lists the authenticated user's live todos that have been completed.
#[get("/completed")]
pub async fn completed_todos(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let sql = format!(
        "SELECT {TODO_COLUMNS} FROM todos \
         WHERE user_id = $1 AND is_completed = true AND archived_at IS NULL"
    );
    let todos = sqlx::query_as::<_, Todo>(&sql)
        .bind(user.user_id)
        .fetch_all(&**pool)
        .await?;

    if todos.is_empty() {
        return Err(AppError::NotFound("no todos found".into()));
    }

    Ok(HttpResponse::Ok().json(todos))
}

/// Marks a todo as completed.
///
/// The update is scoped to the caller's live todos. A target that does not
/// exist, belongs to someone else, or is archived makes this a silent no-op;
/// the endpoint still reports success.
#[put("/mark-completed")]
pub async fn mark_completed(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    body: web::Json<TodoId>,
) -> Result<impl Responder, AppError> {
    sqlx::query(
        "UPDATE todos SET is_completed = true \
         WHERE id = $1 AND user_id = $2 AND archived_at IS NULL",
    )
    .bind(body.id)
    .bind(user.user_id)
    .execute(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "todo marked completed successfully"
    })))
}

/// Soft-deletes a todo. Repeating the delete is a silent no-op, not an error.
#[delete("/delete")]
pub async fn delete_todo(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    body: web::Json<TodoId>,
) -> Result<impl Responder, AppError> {
    sqlx::query(
        "UPDATE todos SET archived_at = NOW() \
         WHERE id = $1 AND user_id = $2 AND archived_at IS NULL",
    )
    .bind(body.id)
    .bind(user.user_id)
    .execute(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "todo deleted successfully"
    })))
}

/// Soft-deletes every live todo of the authenticated user and reports how
/// many rows were archived. Nothing to archive is reported as 404.
#[delete("/delete-all")]
pub async fn delete_all_todos(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query(
        "UPDATE todos SET archived_at = NOW() \
         WHERE user_id = $1 AND archived_at IS NULL",
    )
    .bind(user.user_id)
    .execute(&**pool)
    .await?;

    let count = result.rows_affected();
    if count == 0 {
        return Err(AppError::NotFound("no todos found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "all todos deleted successfully",
        "count": count
    })))
}
