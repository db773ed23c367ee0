mod content;
mod qr;
mod users;

pub use content::{
    CreateCategory, CreateCity, CreateFeaturedItem, CreateGuide, CreateHomepageSection,
    CreateReview, CreateVenue, SectionUpsert, UpdateCategory, UpdateCity, UpdateFeaturedItem,
    UpdateGuide, UpdateHomepageSection, UpdateReview, UpdateVenue,
};
pub use qr::{CreateQrCode, FeedbackSubmission, UpdateFeedbackStatus, UpdateQrCode};
pub use users::CreateUser;
