//! Utility helpers for server code.
