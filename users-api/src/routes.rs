//! HTTP surface of the user collection
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | `GET`/`HEAD` | `/users` | 200, body is a page of users, `X-Pagination` header |
//! | `POST` | `/users` | 201, `Location` header, body is the new id |
//! | `OPTIONS` | `/users` | 200, `Allow` header |
//! | `GET`/`HEAD` | `/users/{id}` | 200 |
//! | `PUT` | `/users/{id}` | 201 when created, 204 when replaced |
//! | `PATCH` | `/users/{id}` | 204 |
//! | `DELETE` | `/users/{id}` | 204 |
//! | `GET` | `/health`, `/ready` | 200 |

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::error::{Error, Result};
use crate::handlers::{
    parse_user_id, Created, LinkBuilder, ListQuery, Negotiated, NoContent, Paginated,
    PatchDocument, Payload, Representation, Upsert, UserDto, UserForCreation, UserForUpdate,
    UserList,
};
use crate::health::{health, readiness};
use crate::ids::UserId;
use crate::state::AppState;

/// Verbs accepted on `/users`
pub const USERS_ALLOW: &str = "GET,OPTIONS,POST";

const USER_ROOT: &str = "user";
const USERS_ROOT: &str = "users";
const ID_ROOT: &str = "id";

/// Build the router with all endpoints and attach `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(readiness))
        .route(
            "/users",
            get(list_users).post(create_user).options(users_options),
        )
        .route(
            "/users/{id}",
            get(get_user)
                .put(replace_user)
                .patch(patch_user)
                .delete(delete_user),
        )
        .with_state(state)
}

async fn list_users(
    State(state): State<AppState>,
    representation: Representation,
    links: LinkBuilder,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Paginated<UserList>> {
    let Query(query) = query.map_err(|rejection| Error::BadRequest(rejection.body_text()))?;

    let page = state.users().list(query).await?;
    let pagination = links.pagination_header(&page);
    let body = UserList::for_representation(representation, page.items);

    Ok(Paginated::new(
        Negotiated::ok(representation, USERS_ROOT, body),
        pagination,
    ))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    representation: Representation,
) -> Result<Negotiated<UserDto>> {
    let id = parse_user_id(&id)?;
    let user = state.users().get(id).await?;
    Ok(Negotiated::ok(representation, USER_ROOT, user))
}

async fn create_user(
    State(state): State<AppState>,
    representation: Representation,
    links: LinkBuilder,
    Payload(input): Payload<UserForCreation>,
) -> Result<Created<UserId>> {
    let user = state.users().create(input).await?;
    Ok(Created::new(
        representation,
        ID_ROOT,
        user.id,
        links.user(&user.id),
    ))
}

async fn replace_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    representation: Representation,
    links: LinkBuilder,
    Payload(input): Payload<UserForUpdate>,
) -> Result<Response> {
    let id = parse_user_id(&id)?;
    let response = match state.users().replace(id, input).await? {
        Upsert::Created(user) => {
            Created::new(representation, ID_ROOT, user.id, links.user(&user.id)).into_response()
        }
        Upsert::Updated(_) => NoContent.into_response(),
    };
    Ok(response)
}

async fn patch_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(document): Payload<PatchDocument>,
) -> Result<NoContent> {
    let id = parse_user_id(&id)?;
    state.users().patch(id, document).await?;
    Ok(NoContent)
}

async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> Result<NoContent> {
    let id = parse_user_id(&id)?;
    state.users().delete(id).await?;
    Ok(NoContent)
}

async fn users_options() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, USERS_ALLOW)])
}
