//! Elio reads medical-supply product labels.
//!
//! Uploaded images go to Google Cloud Vision for OCR; the recognized text is
//! turned into structured product attributes by [`extraction`], and scans are
//! optionally recorded in a libSQL or Supabase inventory database.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod extraction;
pub mod models;
pub mod services;
pub mod vision;
