//! Dashboard command.

use anyhow::Result;
use hindsight_core::routes::Route;

use crate::app::App;

pub async fn execute(app: &App) -> Result<()> {
    app.navigate(Route::Dashboard).await
}
