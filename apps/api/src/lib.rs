//! Tailor API: turns untrusted AI resume-tailoring responses into validated
//! results and projects the suggestions back onto the resume text.
//!
//! The core (`tailor::normalize`, `tailor::highlight`) is pure and can be
//! linked in-process; `routes` exposes it over HTTP.

pub mod config;
pub mod errors;
pub mod routes;
pub mod tailor;
