//! # Demo: fan_out
//!
//! Runs one work function against several argument sets concurrently with
//! [`parallel_call`], bounded to two workers, and shows that results come
//! back in input order even though completion order differs.
//!
//! ## Run
//! ```bash
//! cargo run --example fan_out
//! ```

use std::collections::HashMap;
use std::time::Duration;

use callvisor::{CallError, CallFn, Observers, Outcome, parallel_call};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let crawl = CallFn::arc(
        "crawl",
        |args: HashMap<&'static str, u64>, _ctx: CancellationToken| async move {
            let page = args["page"];
            let depth = args["depth"];
            // Later pages finish first.
            tokio::time::sleep(Duration::from_millis(40 - page * 10)).await;
            Ok::<_, CallError>(Outcome::Value(format!("page {page} @ depth {depth}")))
        },
    );

    let dynamic: Vec<_> = (1..=3).map(|p| HashMap::from([("page", p)])).collect();
    let static_args = HashMap::from([("depth", 2)]);

    let results = parallel_call(crawl, dynamic, static_args, 2, &Observers::none()).await?;
    for (i, r) in results.into_iter().enumerate() {
        println!("slot {i}: {:?}", r.value());
    }
    Ok(())
}
