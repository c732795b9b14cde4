use axum::Router;
use kinfolk_core::{IngestPipeline, Storage};

use crate::config::ServerConfig;
use crate::state::AppState;

const PAGE: &str = r##"<body>
<a name="I4"></a><b>Abigail Smith</b> was born on 22 Nov 1744 in Weymouth, Norfolk Co.,
Massachusetts.
<hr>
<a name="I1"></a><b>John Adams</b> was born on 30 Oct 1735 in Braintree, Norfolk Co.,
Massachusetts.  He was married to <a href="#I4">Abigail Smith</a>.  He was a lawyer.
</body>"##;

pub async fn seeded_app() -> Router {
    let storage = Storage::open_memory().await.unwrap();
    let output = IngestPipeline::new().extract_html(PAGE).unwrap();
    storage
        .insert_records("fam01.htm", &output.records)
        .await
        .unwrap();

    crate::app(AppState::with_storage(storage, ServerConfig::default()))
}
