mod landing;
mod not_found;
mod quiz;

pub use landing::LandingView;
pub use not_found::NotFoundView;
pub use quiz::{QuizIntent, QuizView};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
