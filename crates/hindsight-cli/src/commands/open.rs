//! Navigate to a view by path.

use anyhow::Result;
use clap::Args;
use hindsight_core::routes::Route;
use tracing::debug;

use crate::app::App;

#[derive(Args)]
pub struct OpenArgs {
    /// Route path, e.g. /dashboard or /decisions/<id>/outcome. Unknown paths open the login view.
    pub path: String,
}

pub async fn execute(app: &App, args: OpenArgs) -> Result<()> {
    let route = Route::resolve(&args.path);
    debug!(path = %args.path, route = %route, "resolved path");
    app.navigate(route).await
}
