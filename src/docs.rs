//! OpenAPI document and Swagger UI page.
//!
//! The document ships inside the binary. Setting `OPENAPI_SPEC_PATH` swaps in
//! a file that is re-read on every request, so edits show up without a
//! restart.
//!
//! The Swagger UI page pulls its stylesheet and script from unpkg.com unless
//! an asset base URL is configured with `SWAGGER_UI_ASSETS_URL`.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::DocsError;

const BUNDLED_SPEC: &str = include_str!("../openapi/crm-openapi.yaml");

/// Base URL serving `swagger-ui.css` and `swagger-ui-bundle.js`.
pub const DEFAULT_SWAGGER_UI_ASSETS_URL: &str = "https://unpkg.com/swagger-ui-dist@5";

#[derive(Clone, Debug)]
enum DocSource {
    Bundled,
    File(PathBuf),
}

/// Loads the OpenAPI document and renders the Swagger UI page.
#[derive(Clone, Debug)]
pub struct ApiDocs {
    source: DocSource,
    assets_url: String,
}

impl ApiDocs {
    pub fn bundled() -> Self {
        Self::with_source(DocSource::Bundled)
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::with_source(DocSource::File(path.into()))
    }

    fn with_source(source: DocSource) -> Self {
        Self { source, assets_url: DEFAULT_SWAGGER_UI_ASSETS_URL.to_owned() }
    }

    /// Serve the Swagger UI assets from `url` instead of unpkg.com.
    /// A trailing `/` is ignored.
    pub fn with_assets_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.assets_url = url.trim_end_matches('/').to_owned();
        self
    }

    /// The document as JSON. YAML and JSON sources are both accepted.
    pub async fn load(&self) -> Result<Value, DocsError> {
        match &self.source {
            DocSource::Bundled => parse(BUNDLED_SPEC),
            DocSource::File(path) => parse(&read(path).await?),
        }
    }

    /// Swagger UI page that fetches the document from `spec_url`.
    pub fn swagger_ui_html(&self, title: &str, spec_url: &str) -> String {
        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>{title}</title>
  <link rel="stylesheet" href="{assets}/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="{assets}/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{spec_url}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##,
            assets = self.assets_url,
        )
    }
}

impl Default for ApiDocs {
    fn default() -> Self { Self::bundled() }
}

async fn read(path: &Path) -> Result<String, DocsError> {
    tokio::fs::read_to_string(path).await.map_err(|source| DocsError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn parse(raw: &str) -> Result<Value, DocsError> {
    Ok(serde_yaml::from_str(raw)?)
}
