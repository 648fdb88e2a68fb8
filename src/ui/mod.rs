/// Presentation: panels, pages, charts and tables. Reads state, never
/// touches the data layer directly.
pub mod charts;
pub mod pages;
pub mod panels;
pub mod tables;
