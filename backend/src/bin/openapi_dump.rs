//! Print the OpenAPI document as JSON.

use std::io::{self, Write};

use fansite::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> io::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    writeln!(io::stdout().lock(), "{json}")
}
