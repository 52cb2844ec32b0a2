#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod logs;

use tempfile::TempDir;

use crate::db::Database;

pub(crate) use form::{assert_form_submit_button, assert_hx_endpoint, must_get_form};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_content_type, assert_hx_redirect, assert_status_ok};
pub(crate) use logs::ErrorCounter;

/// Create an initialized database in a fresh temporary directory.
///
/// The directory is deleted when the returned [TempDir] is dropped, so keep
/// it alive for as long as the database is used.
#[track_caller]
pub(crate) fn get_test_database() -> (TempDir, Database) {
    let dir = tempfile::tempdir().expect("Could not create temporary directory");
    let database = Database::new(dir.path().join("expenses.db"));
    database
        .initialize()
        .expect("Could not initialize test database");

    (dir, database)
}
