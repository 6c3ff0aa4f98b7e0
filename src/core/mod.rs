pub mod aggregator;
pub mod dashboard;
pub mod form;
pub mod log;

/// Named views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Dashboard listing (default).
    #[default]
    Listing,
    /// Today's activity form.
    Submission,
}

impl View {
    /// Subcommand that opens this view.
    pub fn command(&self) -> &'static str {
        match self {
            View::Listing => "list",
            View::Submission => "submit",
        }
    }
}
