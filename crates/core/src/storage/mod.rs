mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{ContentError, Result};
pub use http_mapping::content_error_to_status_code;
pub use traits::{
    CategoryRepository, CityRepository, ContentStore, CurationRepository, GuideRepository,
    QrRepository, ReviewRepository, VenueRepository,
};
pub use types::{GuideStamp, ReviewStamp, VenueStamp};
