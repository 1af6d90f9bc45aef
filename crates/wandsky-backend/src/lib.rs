//! Typed client for the external WandSky backend REST API.
//!
//! The backend owns every durable record (users, bookings, payments, blog
//! content, reviews, wishlists). Response bodies are mostly passed through as
//! [`serde_json::Value`]; request bodies and the auth envelopes are typed.

pub mod auth;
pub mod blog;
pub mod bookings;
pub mod client;
pub mod error;
pub mod payments;
pub mod reviews;
pub mod types;
pub mod user;
pub mod wishlist;

pub use client::BackendClient;
pub use error::BackendError;
pub use types::{
    AuthenticatedUser, BlogQuery, CancelBooking, ChangePasswordRequest, GoogleProfile,
    NewBlogPost, NewComment, PaymentIntentRequest, PaymentStatusUpdate, ProfileUpdate,
    RegisterRequest,
};
