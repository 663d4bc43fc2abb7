/*! Integration tests for resequence.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - sequence: Ordering behavior exercised through the public API
 * - reconcile: Diff minimality and concurrent persistence semantics
 * - session: End-to-end journeys over an in-memory store, including
 *   supersession of in-flight saves
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("resequence=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod reconcile;
mod sequence;
mod session;
