// src/ui/widgets/mod.rs

// Declare all of our widget modules here.
pub mod footer; // The widget for the dynamic footer bar.
pub mod input; // The widget for the URL input field.
pub mod report_view; // The findings list with knowledge-base details.
pub mod summary; // The widget that displays the scan summary.
