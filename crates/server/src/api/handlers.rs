use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Redirect,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use data_loader::Movie;
use pipeline::{Feedback, Recommendation, UserPreferences};

use crate::feedback::FeedbackRecord;
use crate::orchestrator::RevisedMovie;

use super::{AppError, AppResult, AppState};

// Request/Response types

#[derive(Debug, Serialize)]
pub struct CatalogSummary {
    pub genres: Vec<String>,
    pub min_year: i32,
    pub max_year: i32,
    pub total_movies: usize,
}

/// Form fields of a recommendation request. Empty fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationForm {
    pub genre: Option<String>,
    pub duration: Option<String>,
    pub rating: Option<String>,
    pub year_range: Option<String>,
    pub page: Option<String>,
}

impl RecommendationForm {
    fn preferences(&self) -> UserPreferences {
        UserPreferences {
            genre: self.genre.clone(),
            rating: self.rating.clone(),
            duration: self.duration.clone(),
            year_range: self.year_range.clone(),
        }
    }

    /// Requested page, 1 when absent
    fn page(&self) -> AppResult<usize> {
        match self.page.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            None => Ok(1),
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::InvalidInput(format!("Invalid page number: {}", raw))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub current_page: usize,
    pub total_matches: usize,
}

#[derive(Debug, Serialize)]
pub struct MovieDetailsResponse {
    #[serde(flatten)]
    pub movie: Movie,
    pub feedback: Vec<FeedbackRecord>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackListResponse {
    pub feedback: Vec<FeedbackRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackForm {
    pub movie_title: Option<String>,
    pub rating: Option<String>,
    pub comment: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Genres and year bounds for building a preference form
pub async fn catalog_summary(State(state): State<AppState>) -> Json<CatalogSummary> {
    let catalog = state.service.catalog();
    let (min_year, max_year) = catalog.year_bounds();

    Json(CatalogSummary {
        genres: catalog.genres().into_iter().map(str::to_string).collect(),
        min_year,
        max_year,
        total_movies: catalog.len(),
    })
}

/// Rank the catalog against the submitted preferences and return one page
pub async fn recommend(
    State(state): State<AppState>,
    Form(form): Form<RecommendationForm>,
) -> AppResult<Json<RecommendationResponse>> {
    if state.service.catalog().is_empty() {
        warn!("No data available for recommendations");
        return Err(AppError::Unavailable("No movie data available".to_string()));
    }

    let page = form.page()?;
    let ranked = state.service.recommend(form.preferences(), page).await?;

    if ranked.is_empty() {
        info!("No recommendations found");
        return Err(AppError::NotFound(
            "No movies match your preferences".to_string(),
        ));
    }

    Ok(Json(RecommendationResponse {
        recommendations: ranked.recommendations,
        current_page: ranked.page,
        total_matches: ranked.total_matches,
    }))
}

/// Replace a recommendation that received poor feedback
pub async fn revise(
    State(state): State<AppState>,
    payload: Result<Json<Feedback>, JsonRejection>,
) -> AppResult<Json<RevisedMovie>> {
    let Json(feedback) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    state
        .service
        .revise(&feedback)
        .map(Json)
        .ok_or_else(|| movie_not_found(&feedback.movie_title))
}

/// A movie together with the feedback it has received
pub async fn movie_details(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<MovieDetailsResponse>> {
    info!("Accessing feedback page for movie: {}", title);
    let movie = state
        .service
        .catalog()
        .get_by_title(&title)
        .cloned()
        .ok_or_else(|| movie_not_found(&title))?;

    let feedback = query_feedback(&state, title).await?;
    Ok(Json(MovieDetailsResponse { movie, feedback }))
}

/// Feedback for one title, newest first
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<FeedbackListResponse>> {
    let feedback = query_feedback(&state, title).await?;
    Ok(Json(FeedbackListResponse { feedback }))
}

/// Store feedback and redirect to the movie's page
pub async fn submit_feedback(
    State(state): State<AppState>,
    Form(form): Form<FeedbackForm>,
) -> AppResult<Redirect> {
    let title = form.movie_title.filter(|t| !t.is_empty());
    let rating = form.rating.filter(|r| !r.is_empty());
    let (Some(title), Some(rating)) = (title, rating) else {
        return Err(AppError::InvalidInput(
            "Missing movie title or rating.".to_string(),
        ));
    };

    let rating: i32 = rating
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput("Invalid input data provided.".to_string()))?;

    let movie = state
        .service
        .catalog()
        .get_by_title(&title)
        .ok_or_else(|| movie_not_found(&title))?;
    let comment = form.comment.filter(|c| !c.is_empty());
    let record = FeedbackRecord::for_movie(movie, rating, comment);

    let store = state.feedback.clone();
    tokio::task::spawn_blocking(move || store.append(record))
        .await
        .map_err(|e| AppError::Internal(format!("Feedback task panicked: {}", e)))??;

    Ok(Redirect::to(&format!(
        "/movies/{}",
        urlencoding::encode(&title)
    )))
}

async fn query_feedback(state: &AppState, title: String) -> AppResult<Vec<FeedbackRecord>> {
    let store = state.feedback.clone();
    let feedback = tokio::task::spawn_blocking(move || store.query_by_title(&title))
        .await
        .map_err(|e| AppError::Internal(format!("Feedback task panicked: {}", e)))??;
    Ok(feedback)
}

fn movie_not_found(title: &str) -> AppError {
    AppError::NotFound(format!("Movie with title \"{}\" not found.", title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_parsing() {
        let mut form = RecommendationForm::default();
        assert_eq!(form.page().unwrap(), 1);

        form.page = Some("3".to_string());
        assert_eq!(form.page().unwrap(), 3);

        form.page = Some(" ".to_string());
        assert_eq!(form.page().unwrap(), 1);

        form.page = Some("two".to_string());
        assert!(matches!(form.page(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_form_to_preferences() {
        let form = RecommendationForm {
            genre: Some("Drama".to_string()),
            year_range: Some(String::new()),
            ..Default::default()
        };

        let prefs = form.preferences();
        assert_eq!(prefs.genre(), Some("Drama"));
        assert!(prefs.year_range().is_none());
    }
}
