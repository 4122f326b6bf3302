use axum::{extract::State, response::Json};

use crate::{
    error::ChromaticError,
    server::AppState,
    types::{AlbumChromaticInfo, ChromaticityRequest, GroupingRequest},
    warning,
};

pub async fn chromatic_albums(
    State(state): State<AppState>,
    Json(request): Json<ChromaticityRequest>,
) -> Result<Json<Vec<AlbumChromaticInfo>>, ChromaticError> {
    match state.service.albums_for_request(&request).await {
        Ok(albums) => Ok(Json(albums.into_iter().map(Into::into).collect())),
        Err(e) => {
            warning!("Chromatic albums request failed: {}", e);
            Err(e)
        }
    }
}

pub async fn chromatic_groups(
    State(state): State<AppState>,
    Json(request): Json<GroupingRequest>,
) -> Result<Json<Vec<Vec<AlbumChromaticInfo>>>, ChromaticError> {
    match state.service.groups_for_request(&request).await {
        Ok(groups) => Ok(Json(
            groups
                .into_iter()
                .map(|group| group.into_iter().map(Into::into).collect())
                .collect(),
        )),
        Err(e) => {
            warning!("Chromatic groups request failed: {}", e);
            Err(e)
        }
    }
}
