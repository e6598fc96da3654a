// Application state for HTTP handlers
use crate::application::environment_service::EnvironmentService;
use crate::application::places_service::PlacesService;

#[derive(Clone)]
pub struct AppState {
    pub service_name: String,
    pub environment_service: EnvironmentService,
    pub places_service: PlacesService,
}
