//! darkmode demo page
//!
//! Serve with `dx serve --features web`.

fn main() {
    // Initialize logging
    dioxus::logger::initialize_default();

    tracing::info!(
        "Starting darkmode demo v{} ({})",
        darkmode::VERSION,
        darkmode::GIT_SHA
    );

    dioxus::launch(darkmode::app::App);
}
