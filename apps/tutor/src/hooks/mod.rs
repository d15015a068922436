pub mod assessment;
pub mod lesson;

use crate::api::TutorApiClient;

pub(crate) fn api_client() -> Option<TutorApiClient> {
    crate::API_CLIENT.get().cloned()
}
