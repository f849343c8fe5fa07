//! Task pages
//!
//! Form-driven CRUD over tasks. Each handler answers with a view to render,
//! a redirect back to the list, or a [`PageError`].

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tm_core::category::CategoryRepository;
use tm_core::select::{category_options, priority_options, status_options, SelectListItem};
use tm_core::task::{
    FieldErrors, Task, TaskFilter, TaskFilterView, TaskForm, TaskRepository,
};
use tm_core::Error;

use crate::csrf::{self, VerifiedForm};
use crate::error::PageError;
use crate::state::AppState;
use crate::view::View;

const LIST_PATH: &str = "/Tasks";

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub selected_status: Option<String>,
    #[serde(default)]
    pub title_search: Option<String>,
    #[serde(default)]
    pub priority_filter: Option<String>,
}

impl ListQuery {
    /// Unrecognised enum values are treated as absent
    fn into_filter(self) -> TaskFilter {
        TaskFilter::new(
            self.selected_status.as_deref().and_then(|s| s.parse().ok()),
            self.title_search,
            self.priority_filter.as_deref().and_then(|s| s.parse().ok()),
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexModel {
    #[serde(flatten)]
    filter: TaskFilterView,
    status_filter_values: Vec<SelectListItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskFormModel {
    task: TaskForm,
    errors: FieldErrors,
    categories: Vec<SelectListItem>,
    status_values: Vec<SelectListItem>,
    priority_values: Vec<SelectListItem>,
    anti_forgery_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteModel {
    task: Task,
    anti_forgery_token: String,
}

/// Delete confirmations carry nothing but the anti-forgery token
#[derive(Debug, Deserialize)]
struct ConfirmForm {}

fn parse_id(raw: &str) -> Result<Uuid, PageError> {
    Uuid::parse_str(raw.trim()).map_err(|_| PageError::NotFound)
}

fn redirect_to_list() -> Response {
    Redirect::to(LIST_PATH).into_response()
}

async fn form_model(
    state: &AppState,
    task: TaskForm,
    errors: FieldErrors,
    anti_forgery_token: String,
) -> Result<TaskFormModel, PageError> {
    let categories = state.category_store().list().await?;
    Ok(TaskFormModel {
        categories: category_options(&categories, task.category_id_value()),
        status_values: status_options(task.status_value()),
        priority_values: priority_options(task.priority_value()),
        task,
        errors,
        anti_forgery_token,
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /Tasks - List tasks matching the query filters, lowest priority first
async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<View<IndexModel>, PageError> {
    let filter = query.into_filter();
    let status_filter_values = status_options(filter.status);
    let tasks = state.task_store().list(filter.clone()).await?;

    Ok(View::new(
        "Tasks/Index",
        IndexModel {
            filter: TaskFilterView::new(filter, tasks),
            status_filter_values,
        },
    ))
}

/// GET /Tasks/Details/{id}
async fn details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<View<Task>, PageError> {
    let id = parse_id(&id)?;
    let task = state
        .task_store()
        .get_with_category(id)
        .await?
        .ok_or(PageError::NotFound)?;

    Ok(View::new("Tasks/Details", task))
}

/// GET /Tasks/Create
async fn create_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, View<TaskFormModel>), PageError> {
    let (jar, token) = csrf::issue(jar, state.secure_cookies());
    let model = form_model(&state, TaskForm::blank(), FieldErrors::default(), token).await?;

    Ok((jar, View::new("Tasks/Create", model)))
}

/// POST /Tasks/Create
async fn create_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    VerifiedForm(form): VerifiedForm<TaskForm>,
) -> Result<Response, PageError> {
    let submitted = form.clone();
    match form.into_task(Uuid::new_v4(), state.category_store()).await? {
        Ok(task) => {
            state.task_store().create(task).await?;
            Ok(redirect_to_list())
        }
        Err(errors) => {
            tracing::debug!(?errors, "Create form rejected");
            let (jar, token) = csrf::issue(jar, state.secure_cookies());
            let model = form_model(&state, submitted, errors, token).await?;
            let view = View::new("Tasks/Create", model).with_status(StatusCode::UNPROCESSABLE_ENTITY);
            Ok((jar, view).into_response())
        }
    }
}

/// GET /Tasks/Edit/{id}
async fn edit_form(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Result<(CookieJar, View<TaskFormModel>), PageError> {
    let id = parse_id(&id)?;
    let task = state
        .task_store()
        .get(id)
        .await?
        .ok_or(PageError::NotFound)?;

    let (jar, token) = csrf::issue(jar, state.secure_cookies());
    let model = form_model(&state, TaskForm::from_task(&task), FieldErrors::default(), token).await?;

    Ok((jar, View::new("Tasks/Edit", model)))
}

/// POST /Tasks/Edit/{id} - Replace every field of the task
async fn edit_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    VerifiedForm(form): VerifiedForm<TaskForm>,
) -> Result<Response, PageError> {
    let id = parse_id(&id)?;
    if form.submitted_id() != Some(id) {
        tracing::warn!(task_id = %id, "Edit form posted for a different task");
        return Err(PageError::NotFound);
    }

    let submitted = form.clone();
    let task = match form.into_task(id, state.category_store()).await? {
        Ok(task) => task,
        Err(errors) => {
            tracing::debug!(?errors, "Edit form rejected");
            let (jar, token) = csrf::issue(jar, state.secure_cookies());
            let model = form_model(&state, submitted, errors, token).await?;
            let view = View::new("Tasks/Edit", model).with_status(StatusCode::UNPROCESSABLE_ENTITY);
            return Ok((jar, view).into_response());
        }
    };

    match state.task_store().update(task).await {
        Ok(_) => Ok(redirect_to_list()),
        Err(Error::Concurrency(conflict)) => {
            if !state.task_store().exists(conflict).await? {
                tracing::warn!(task_id = %conflict, "Task vanished during edit");
                return Err(PageError::NotFound);
            }
            Err(Error::Concurrency(conflict).into())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /Tasks/Delete/{id} - Confirmation page
async fn delete_form(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Result<(CookieJar, View<DeleteModel>), PageError> {
    let id = parse_id(&id)?;
    let task = state
        .task_store()
        .get_with_category(id)
        .await?
        .ok_or(PageError::NotFound)?;

    let (jar, anti_forgery_token) = csrf::issue(jar, state.secure_cookies());
    Ok((
        jar,
        View::new(
            "Tasks/Delete",
            DeleteModel {
                task,
                anti_forgery_token,
            },
        ),
    ))
}

/// POST /Tasks/Delete/{id} - Deleting a missing task is not an error
async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    VerifiedForm(_): VerifiedForm<ConfirmForm>,
) -> Result<Response, PageError> {
    let id = Uuid::parse_str(id.trim()).unwrap_or(Uuid::nil());
    if !state.task_store().delete(id).await? {
        tracing::debug!(task_id = %id, "Nothing to delete");
    }
    Ok(redirect_to_list())
}

/// Routes reached without an identifier
async fn missing_id() -> PageError {
    PageError::NotFound
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to(LIST_PATH) }))
        .route("/Tasks", get(index))
        .route("/Tasks/Index", get(index))
        .route("/Tasks/Details", get(missing_id))
        .route("/Tasks/Details/{id}", get(details))
        .route("/Tasks/Create", get(create_form).post(create_submit))
        .route("/Tasks/Edit", get(missing_id))
        .route("/Tasks/Edit/{id}", get(edit_form).post(edit_submit))
        .route("/Tasks/Delete", get(missing_id))
        .route("/Tasks/Delete/{id}", get(delete_form).post(delete_submit))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use tm_core::category::CategoryRepository;
    use tm_core::task::{Task, TaskPriority, TaskRepository, TaskStatus};

    use crate::csrf::TOKEN_NAME;
    use crate::state::AppState;

    const TOKEN: &str = "test-token";

    async fn build_state() -> (AppState, i64, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = tm_core::db::connect_path(&temp_dir.path().join("tasks.db"), 1)
            .await
            .unwrap();
        let state = AppState::with_pool(pool, false);
        let category_id = state.category_store().list().await.unwrap()[0].id;
        (state, category_id, temp_dir)
    }

    fn app(state: AppState) -> Router {
        super::router().with_state(state)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn post_form(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::COOKIE, format!("{}={}", TOKEN_NAME, TOKEN))
            .body(Body::from(format!("{}&{}={}", body, TOKEN_NAME, TOKEN)))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn task_titles(payload: &Value) -> Vec<String> {
        payload["model"]["tasks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap().to_string())
            .collect()
    }

    async fn seed(state: &AppState, title: &str, status: TaskStatus, priority: TaskPriority, category_id: i64) -> Task {
        let task = Task::new(title, category_id)
            .with_description("seeded")
            .with_status(status)
            .with_priority(priority);
        state.task_store().create(task).await.unwrap()
    }

    fn assert_redirects_to_list(response: &axum::response::Response) {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/Tasks");
    }

    #[tokio::test]
    async fn index_filters_by_priority() {
        let (state, category_id, _temp) = build_state().await;
        seed(&state, "A", TaskStatus::NotStarted, TaskPriority::Low, category_id).await;
        seed(&state, "B", TaskStatus::NotStarted, TaskPriority::High, category_id).await;

        let response = app(state)
            .oneshot(get("/Tasks?priorityFilter=High"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload["view"], "Tasks/Index");
        assert_eq!(task_titles(&payload), vec!["B"]);
        assert_eq!(payload["model"]["tasks"][0]["priority"], "High");
        assert_eq!(payload["model"]["priorityFilter"], "High");
    }

    #[tokio::test]
    async fn index_without_filters_returns_everything_sorted() {
        let (state, category_id, _temp) = build_state().await;
        seed(&state, "urgent", TaskStatus::InProgress, TaskPriority::High, category_id).await;
        seed(&state, "someday", TaskStatus::NotStarted, TaskPriority::Low, category_id).await;
        seed(&state, "soon", TaskStatus::Completed, TaskPriority::Medium, category_id).await;

        let response = app(state).oneshot(get("/Tasks")).await.unwrap();
        let payload = json_body(response).await;

        assert_eq!(task_titles(&payload), vec!["someday", "soon", "urgent"]);
        let selected = payload["model"]["statusFilterValues"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|item| item["selected"] == true)
            .count();
        assert_eq!(selected, 0);
    }

    #[tokio::test]
    async fn index_combines_status_and_title_filters() {
        let (state, category_id, _temp) = build_state().await;
        seed(&state, "Plan trip", TaskStatus::InProgress, TaskPriority::Low, category_id).await;
        seed(&state, "plan budget", TaskStatus::InProgress, TaskPriority::Low, category_id).await;
        seed(&state, "Plan party", TaskStatus::Completed, TaskPriority::Low, category_id).await;

        let response = app(state)
            .oneshot(get("/Tasks?selectedStatus=1&titleSearch=Plan&priorityFilter="))
            .await
            .unwrap();
        let payload = json_body(response).await;

        assert_eq!(task_titles(&payload), vec!["Plan trip"]);
        assert_eq!(payload["model"]["selectedStatus"], "InProgress");
        let selected: Vec<&str> = payload["model"]["statusFilterValues"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|item| item["selected"] == true)
            .map(|item| item["value"].as_str().unwrap())
            .collect();
        assert_eq!(selected, vec!["InProgress"]);
    }

    #[tokio::test]
    async fn details_includes_category() {
        let (state, category_id, _temp) = build_state().await;
        let task = seed(&state, "Read", TaskStatus::NotStarted, TaskPriority::Low, category_id).await;

        let response = app(state)
            .oneshot(get(&format!("/Tasks/Details/{}", task.task_id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload["view"], "Tasks/Details");
        assert_eq!(payload["model"]["title"], "Read");
        assert_eq!(payload["model"]["category"]["id"], category_id);
    }

    #[tokio::test]
    async fn single_task_pages_return_not_found() {
        let (state, _, _temp) = build_state().await;
        let unknown = uuid::Uuid::new_v4();

        for uri in [
            format!("/Tasks/Details/{}", unknown),
            format!("/Tasks/Edit/{}", unknown),
            format!("/Tasks/Delete/{}", unknown),
            "/Tasks/Details".to_string(),
            "/Tasks/Edit".to_string(),
            "/Tasks/Delete".to_string(),
            "/Tasks/Details/not-a-guid".to_string(),
        ] {
            let response = app(state.clone()).oneshot(get(&uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn create_form_supplies_selectors_and_token() {
        let (state, _, _temp) = build_state().await;

        let response = app(state).oneshot(get("/Tasks/Create")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
        assert!(cookie.starts_with(TOKEN_NAME));
        assert!(cookie.contains("HttpOnly"));

        let payload = json_body(response).await;
        let model = &payload["model"];
        assert_eq!(payload["view"], "Tasks/Create");
        assert_eq!(model["categories"].as_array().unwrap().len(), 3);
        assert_eq!(model["categories"][0]["text"], "Errands");
        assert_eq!(model["statusValues"].as_array().unwrap().len(), 3);
        assert_eq!(model["priorityValues"].as_array().unwrap().len(), 3);
        assert!(cookie.contains(model["antiForgeryToken"].as_str().unwrap()));
    }

    #[tokio::test]
    async fn create_submit_persists_one_task_and_redirects() {
        let (state, category_id, _temp) = build_state().await;
        let existing = seed(&state, "Old", TaskStatus::NotStarted, TaskPriority::Low, category_id).await;

        let body = format!(
            "taskId={}&title=New+task&description=Details&createdOn=2024-05-01&status=InProgress&priority=High&categoryId={}",
            existing.task_id, category_id
        );
        let response = app(state.clone())
            .oneshot(post_form("/Tasks/Create", body))
            .await
            .unwrap();

        assert_redirects_to_list(&response);
        assert_eq!(state.task_store().count().await.unwrap(), 2);

        let created: Vec<Task> = state
            .task_store()
            .list(Default::default())
            .await
            .unwrap()
            .into_iter()
            .filter(|t| t.title == "New task")
            .collect();
        assert_eq!(created.len(), 1);
        assert_ne!(created[0].task_id, existing.task_id);
        assert_eq!(created[0].status, TaskStatus::InProgress);
        assert_eq!(created[0].priority, TaskPriority::High);
    }

    #[tokio::test]
    async fn create_submit_with_empty_title_redisplays_form() {
        let (state, category_id, _temp) = build_state().await;

        let body = format!(
            "title=&description=Details&status=NotStarted&priority=Low&categoryId={}",
            category_id
        );
        let response = app(state.clone())
            .oneshot(post_form("/Tasks/Create", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = json_body(response).await;
        assert_eq!(payload["view"], "Tasks/Create");
        assert_eq!(payload["model"]["task"]["description"], "Details");
        assert!(payload["model"]["errors"]["title"].is_array());
        assert_eq!(payload["model"]["antiForgeryToken"], "test-token");
        assert_eq!(payload["model"]["categories"][0]["value"], category_id.to_string());
        assert_eq!(state.task_store().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_submit_without_token_is_rejected() {
        let (state, category_id, _temp) = build_state().await;

        let request = Request::builder()
            .method("POST")
            .uri("/Tasks/Create")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!(
                "title=T&description=D&status=NotStarted&priority=Low&categoryId={}",
                category_id
            )))
            .unwrap();
        let response = app(state.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.task_store().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn edit_form_preselects_current_values() {
        let (state, category_id, _temp) = build_state().await;
        let task = seed(&state, "Edit me", TaskStatus::Completed, TaskPriority::Medium, category_id).await;

        let response = app(state)
            .oneshot(get(&format!("/Tasks/Edit/{}", task.task_id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        let model = &payload["model"];
        let selected = |list: &str| -> Vec<String> {
            model[list]
                .as_array()
                .unwrap()
                .iter()
                .filter(|item| item["selected"] == true)
                .map(|item| item["value"].as_str().unwrap().to_string())
                .collect()
        };
        assert_eq!(selected("statusValues"), vec!["Completed"]);
        assert_eq!(selected("priorityValues"), vec!["Medium"]);
        assert_eq!(selected("categories"), vec![category_id.to_string()]);
        assert_eq!(model["task"]["taskId"], task.task_id.to_string());
    }

    #[tokio::test]
    async fn edit_submit_replaces_task() {
        let (state, category_id, _temp) = build_state().await;
        let task = seed(&state, "Before", TaskStatus::NotStarted, TaskPriority::Low, category_id).await;

        let body = format!(
            "taskId={}&title=After&description=Changed&createdOn=2024-01-02&status=Completed&priority=Medium&categoryId={}",
            task.task_id, category_id
        );
        let response = app(state.clone())
            .oneshot(post_form(&format!("/Tasks/Edit/{}", task.task_id), body))
            .await
            .unwrap();

        assert_redirects_to_list(&response);
        let stored = state.task_store().get(task.task_id).await.unwrap().unwrap();
        assert_eq!(stored.title, "After");
        assert_eq!(stored.description, "Changed");
        assert_eq!(stored.status, TaskStatus::Completed);
        assert_eq!(stored.priority, TaskPriority::Medium);
    }

    #[tokio::test]
    async fn edit_submit_with_mismatched_id_is_not_found() {
        let (state, category_id, _temp) = build_state().await;
        let task = seed(&state, "Keep", TaskStatus::NotStarted, TaskPriority::Low, category_id).await;
        let other = uuid::Uuid::new_v4();

        let body = format!(
            "taskId={}&title=Hijacked&description=D&status=Completed&priority=High&categoryId={}",
            other, category_id
        );
        let response = app(state.clone())
            .oneshot(post_form(&format!("/Tasks/Edit/{}", task.task_id), body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let stored = state.task_store().get(task.task_id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Keep");
    }

    #[tokio::test]
    async fn edit_submit_for_deleted_task_is_not_found() {
        let (state, category_id, _temp) = build_state().await;
        let task = seed(&state, "Gone", TaskStatus::NotStarted, TaskPriority::Low, category_id).await;
        state.task_store().delete(task.task_id).await.unwrap();

        let body = format!(
            "taskId={}&title=Gone&description=D&status=NotStarted&priority=Low&categoryId={}",
            task.task_id, category_id
        );
        let response = app(state.clone())
            .oneshot(post_form(&format!("/Tasks/Edit/{}", task.task_id), body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(state.task_store().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn edit_submit_with_blank_title_redisplays_form() {
        let (state, category_id, _temp) = build_state().await;
        let task = seed(&state, "Stay", TaskStatus::NotStarted, TaskPriority::Low, category_id).await;

        let body = format!(
            "taskId={}&title=&description=D&status=NotStarted&priority=Low&categoryId={}",
            task.task_id, category_id
        );
        let response = app(state.clone())
            .oneshot(post_form(&format!("/Tasks/Edit/{}", task.task_id), body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = json_body(response).await;
        assert_eq!(payload["view"], "Tasks/Edit");
        let stored = state.task_store().get(task.task_id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Stay");
    }

    #[tokio::test]
    async fn delete_form_shows_task_with_category() {
        let (state, category_id, _temp) = build_state().await;
        let task = seed(&state, "Bye", TaskStatus::NotStarted, TaskPriority::Low, category_id).await;

        let response = app(state)
            .oneshot(get(&format!("/Tasks/Delete/{}", task.task_id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload["view"], "Tasks/Delete");
        assert_eq!(payload["model"]["task"]["title"], "Bye");
        assert_eq!(payload["model"]["task"]["category"]["id"], category_id);
    }

    #[tokio::test]
    async fn delete_submit_removes_task() {
        let (state, category_id, _temp) = build_state().await;
        let task = seed(&state, "Bye", TaskStatus::NotStarted, TaskPriority::Low, category_id).await;

        let response = app(state.clone())
            .oneshot(post_form(&format!("/Tasks/Delete/{}", task.task_id), String::new()))
            .await
            .unwrap();

        assert_redirects_to_list(&response);
        assert!(!state.task_store().exists(task.task_id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_submit_for_unknown_task_still_redirects() {
        let (state, category_id, _temp) = build_state().await;
        seed(&state, "Stay", TaskStatus::NotStarted, TaskPriority::Low, category_id).await;

        let response = app(state.clone())
            .oneshot(post_form(
                &format!("/Tasks/Delete/{}", uuid::Uuid::new_v4()),
                String::new(),
            ))
            .await
            .unwrap();

        assert_redirects_to_list(&response);
        assert_eq!(state.task_store().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_submit_reports_missing_table_as_problem() {
        let (state, _, _temp) = build_state().await;
        sqlx::query("DROP TABLE tasks")
            .execute(state.pool())
            .await
            .unwrap();

        let response = app(state)
            .oneshot(post_form(
                &format!("/Tasks/Delete/{}", uuid::Uuid::new_v4()),
                String::new(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json"
        );
    }

    #[tokio::test]
    async fn root_redirects_to_list() {
        let (state, _, _temp) = build_state().await;
        let response = app(state).oneshot(get("/")).await.unwrap();
        assert_redirects_to_list(&response);
    }
}
