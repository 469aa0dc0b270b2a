//! Round trip between the `quote` command and the quote endpoint.

use portfolio_terminal::commands::{DispatchOutcome, Dispatcher};
use portfolio_terminal::quote::{FALLBACK_LINE, QUOTES};
use portfolio_terminal::server;
use portfolio_terminal::session::MemStore;
use portfolio_terminal::transcript::Transcript;
use std::net::TcpStream;
use std::time::Duration;

const PORT: u16 = 47113;

fn fetch_quote_line(rt: &tokio::runtime::Runtime) -> String {
    let mut dispatcher =
        Dispatcher::new(Box::new(MemStore::default()), "dark", rt.handle().clone());
    let mut out = Transcript::new();
    match dispatcher.dispatch("quote", &mut out) {
        DispatchOutcome::Pending(mut rx) => rt.block_on(rx.recv()).expect("fetch task died"),
        DispatchOutcome::Done => panic!("quote should complete asynchronously"),
    }
}

#[test]
fn quote_command_round_trips_and_degrades() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.spawn(async {
        let _ = server::serve(PORT).await;
    });

    let mut up = false;
    for _ in 0..50 {
        if TcpStream::connect(("127.0.0.1", PORT)).is_ok() {
            up = true;
            break;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    assert!(up, "quote server did not start");

    std::env::set_var("QUOTE_API_URL", format!("http://127.0.0.1:{PORT}/api/quote"));
    let line = fetch_quote_line(&rt);
    assert!(line.starts_with("💬 Quote of the Moment:"));
    assert!(QUOTES.iter().any(|q| line.contains(q)));

    // An unreachable endpoint degrades to the fixed fallback line.
    std::env::set_var("QUOTE_API_URL", format!("http://127.0.0.1:{}/api/quote", PORT + 1));
    assert_eq!(fetch_quote_line(&rt), FALLBACK_LINE);

    // So does a route the server does not know (404).
    std::env::set_var(
        "QUOTE_API_URL",
        format!("http://127.0.0.1:{PORT}/api/fortune"),
    );
    assert_eq!(fetch_quote_line(&rt), FALLBACK_LINE);
}
