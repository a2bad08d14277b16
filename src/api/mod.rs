use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use validator::Validate;

use crate::calculator::levels::{ActivityLevel, ExerciseGoal};
use crate::calculator::metrics::{BiometricInput, CalculationResult};
use crate::suggestions::error::SuggestionError;
use crate::suggestions::gateway::SuggestionGateway;
use crate::suggestions::types::{
    DetailedRecipe, ExerciseParams, ExerciseSuggestion, MealSuggestion, RecipeVideo,
};

#[derive(Clone)]
pub struct AppState {
    gateway: Arc<SuggestionGateway>,
    session: Arc<RwLock<CoachSession>>,
}

/// Server-side mirror of the browser client's state: the last
/// calculation plus the exercise suggestions fetched against it.
#[derive(Default)]
struct CoachSession {
    biometrics: Option<BiometricInput>,
    activity_level: Option<ActivityLevel>,
    results: Option<CalculationResult>,
    exercise_goal: Option<ExerciseGoal>,
    exercise_suggestions: Vec<ExerciseSuggestion>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    #[serde(flatten)]
    #[validate]
    biometrics: BiometricInput,
    activity_level: ActivityLevel,
}

#[derive(Deserialize, Validate)]
pub struct MealsRequest {
    #[validate(length(min = 1, max = 2000))]
    ingredients: String,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[validate(length(min = 1, max = 200))]
    meal_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisesRequest {
    exercise_goal: ExerciseGoal,
}

#[derive(Serialize)]
pub struct MealsResponse {
    suggestions: Vec<MealSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Serialize)]
pub struct ExercisesResponse {
    suggestions: Vec<ExerciseSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Serialize)]
struct ApiResponse {
    status: String,
}

/// Create and configure the API router
pub fn create_api(gateway: SuggestionGateway) -> Router {
    let state = AppState {
        gateway: Arc::new(gateway),
        session: Arc::new(RwLock::new(CoachSession::default())),
    };

    // Fully permissive CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/meals", post(meals_handler))
        .route("/recipes", post(recipes_handler))
        .route("/videos", post(videos_handler))
        .route("/exercises", post(exercises_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .with_state(state)
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse { status: message }),
    )
        .into_response()
}

fn suggestion_error(e: &SuggestionError) -> Response {
    let status = match e {
        SuggestionError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        SuggestionError::Transport { .. }
        | SuggestionError::MalformedResponse(_)
        | SuggestionError::UnexpectedShape(_) => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(ApiResponse {
            status: e.to_string(),
        }),
    )
        .into_response()
}

async fn calculate_handler(
    State(state): State<AppState>,
    Json(request): Json<CalculateRequest>,
) -> Response {
    if let Err(e) = request.validate() {
        return bad_request(format!("Invalid input: {}", e));
    }

    let results = CalculationResult::compute(&request.biometrics, request.activity_level);

    // Replacing the calculation invalidates exercise suggestions made
    // against the previous TDEE.
    let mut session = state.session.write().await;
    if session.exercise_goal.is_some() || !session.exercise_suggestions.is_empty() {
        log::debug!("Resetting exercise state from the previous calculation");
    }
    session.biometrics = Some(request.biometrics);
    session.activity_level = Some(request.activity_level);
    session.results = Some(results);
    session.exercise_goal = None;
    session.exercise_suggestions.clear();

    Json(results).into_response()
}

async fn meals_handler(
    State(state): State<AppState>,
    Json(request): Json<MealsRequest>,
) -> Response {
    if let Err(e) = request.validate() {
        return bad_request(format!("Invalid input: {}", e));
    }
    let ingredients = request.ingredients.trim();
    if ingredients.is_empty() {
        return bad_request("Please provide at least one ingredient.".to_string());
    }

    match state.gateway.suggest_meals(ingredients).await {
        Ok(suggestions) => {
            let message = suggestions
                .is_empty()
                .then(|| "No meal suggestions found for those ingredients.".to_string());
            Json(MealsResponse {
                suggestions,
                message,
            })
            .into_response()
        }
        Err(e) => suggestion_error(&e),
    }
}

async fn recipes_handler(
    State(state): State<AppState>,
    Json(request): Json<RecipeRequest>,
) -> Response {
    if let Err(e) = request.validate() {
        return bad_request(format!("Invalid input: {}", e));
    }

    match state.gateway.detailed_recipe(request.meal_name.trim()).await {
        Ok(recipe) => Json::<DetailedRecipe>(recipe).into_response(),
        Err(e) => suggestion_error(&e),
    }
}

async fn videos_handler(
    State(state): State<AppState>,
    Json(request): Json<RecipeRequest>,
) -> Response {
    if let Err(e) = request.validate() {
        return bad_request(format!("Invalid input: {}", e));
    }

    match state
        .gateway
        .find_recipe_video(request.meal_name.trim())
        .await
    {
        Ok(video) => Json::<RecipeVideo>(video).into_response(),
        Err(e) => suggestion_error(&e),
    }
}

async fn exercises_handler(
    State(state): State<AppState>,
    Json(request): Json<ExercisesRequest>,
) -> Response {
    let params = {
        let session = state.session.read().await;
        match (&session.biometrics, session.activity_level, &session.results) {
            (Some(biometrics), Some(level), Some(results)) => ExerciseParams {
                tdee: results.tdee,
                gender: biometrics.gender,
                age: biometrics.age,
                current_activity_level: level,
                exercise_goal: request.exercise_goal,
            },
            _ => {
                return bad_request(
                    "No calculation available. Call /calculate before /exercises.".to_string(),
                )
            }
        }
    };

    match state.gateway.suggest_exercises(&params).await {
        Ok(suggestions) => {
            let mut session = state.session.write().await;
            session.exercise_goal = Some(request.exercise_goal);
            session.exercise_suggestions = suggestions.clone();

            let message = suggestions
                .is_empty()
                .then(|| "No exercise suggestions found.".to_string());
            Json(ExercisesResponse {
                suggestions,
                message,
            })
            .into_response()
        }
        Err(e) => suggestion_error(&e),
    }
}

async fn health_check(State(state): State<AppState>) -> Response {
    let status = if state.gateway.is_available() {
        "Server is running; AI suggestions enabled"
    } else {
        "Server is running; AI suggestions disabled (no API key)"
    };
    Json(ApiResponse {
        status: status.to_string(),
    })
    .into_response()
}
