use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use justdonate::form;
use justdonate::handlers::{donation_session, DonationType};
use justdonate::stripe::{Auth, CheckoutSessionResponse};

#[test]
fn monthly_donation_builds_a_subscription_session() {
    let session = donation_session(DonationType::Monthly, 18.0, "https://example.org");

    assert_eq!(session.mode, "subscription");
    assert_eq!(session.line_items.len(), 1);
    let price_data = &session.line_items[0].price_data;
    assert_eq!(price_data.currency, "usd");
    assert_eq!(price_data.unit_amount, 1800);
    assert_eq!(price_data.recurring.as_ref().unwrap().interval, "month");
    assert_eq!(
        session.success_url,
        "https://example.org/donate-success.html?type=monthly"
    );
    assert_eq!(session.cancel_url, "https://example.org/donate.html");
}

#[test]
fn one_time_donation_builds_a_payment_session_without_recurring() {
    let session = donation_session(DonationType::OneTime, 5.0, "https://example.org");

    assert_eq!(session.mode, "payment");
    let price_data = &session.line_items[0].price_data;
    assert_eq!(price_data.unit_amount, 500);
    assert!(price_data.recurring.is_none());
    assert_eq!(
        session.success_url,
        "https://example.org/donate-success.html?type=one-time"
    );
}

#[test]
fn fractional_amounts_round_to_whole_cents() {
    let session = donation_session(DonationType::OneTime, 12.34, "https://example.org");
    assert_eq!(session.line_items[0].price_data.unit_amount, 1234);
}

#[test]
fn monthly_params_encode_the_recurring_interval() {
    let session = donation_session(DonationType::Monthly, 10.0, "https://example.org");
    let encoded = form::encode(&session.to_params());

    assert!(encoded.starts_with("mode=subscription&"));
    assert!(encoded.contains("line_items%5B0%5D%5Bprice_data%5D%5Bcurrency%5D=usd"));
    assert!(encoded.contains("line_items%5B0%5D%5Bprice_data%5D%5Bunit_amount%5D=1000"));
    assert!(encoded.contains("line_items%5B0%5D%5Bprice_data%5D%5Brecurring%5D%5Binterval%5D=month"));
    assert!(encoded.contains("line_items%5B0%5D%5Bquantity%5D=1"));
}

#[test]
fn one_time_params_omit_recurring_entirely() {
    let session = donation_session(DonationType::OneTime, 10.0, "https://example.org");
    let encoded = form::encode(&session.to_params());

    assert!(encoded.starts_with("mode=payment&"));
    assert!(!encoded.contains("recurring"));
}

#[test]
fn error_envelope_deserializes_alongside_session_fields() {
    let created: CheckoutSessionResponse =
        serde_json::from_str(r#"{"error":{"message":"card error","type":"card_error"}}"#).unwrap();
    let stripe_error = created.error.unwrap();
    assert_eq!(stripe_error.message.as_deref(), Some("card error"));
    assert_eq!(stripe_error.error_type.as_deref(), Some("card_error"));
    assert!(created.url.is_none());

    let created: CheckoutSessionResponse =
        serde_json::from_str(r#"{"id":"cs_1","url":"https://pay.example/sess_1"}"#).unwrap();
    assert!(created.error.is_none());
    assert_eq!(created.url.as_deref(), Some("https://pay.example/sess_1"));
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Single-request Stripe stand-in on a plain thread, usable from both the
/// blocking and the async client. Hands the captured request back for
/// assertions on what went over the wire.
fn spawn_stub(body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let mut buf = vec![0u8; 16384];
        let mut read = 0;
        loop {
            if read == buf.len() {
                break;
            }
            let n = match socket.read(&mut buf[read..]) {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            };
            read += n;
            if let Some(end) = find(&buf[..read], b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let content_length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if read >= end + 4 + content_length {
                    break;
                }
            }
        }
        tx.send(String::from_utf8_lossy(&buf[..read]).to_string()).ok();
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).ok();
    });
    (format!("http://{}", addr), rx)
}

#[test]
fn blocking_post_sends_bearer_auth_and_form_body() {
    let (api_base, captured) = spawn_stub(r#"{"id":"cs_9","url":"https://pay.example/sess_9"}"#);
    let creds = Auth::new("sk_test_123".to_owned(), api_base);
    let session = donation_session(DonationType::OneTime, 5.0, "https://example.org");

    let created = session.post(&creds).unwrap();
    assert_eq!(created.url.as_deref(), Some("https://pay.example/sess_9"));

    let request = captured.recv().unwrap();
    assert!(request.starts_with("POST /v1/checkout/sessions"));
    assert!(request.to_lowercase().contains("authorization: bearer sk_test_123"));
    assert!(request
        .to_lowercase()
        .contains("content-type: application/x-www-form-urlencoded"));
    assert!(request.contains("mode=payment"));
    assert!(request.contains("line_items%5B0%5D%5Bprice_data%5D%5Bunit_amount%5D=500"));
}

#[tokio::test]
async fn async_post_returns_the_session_url() {
    let (api_base, captured) = spawn_stub(r#"{"id":"cs_2","url":"https://pay.example/sess_2"}"#);
    let creds = Auth::new("sk_test_123".to_owned(), api_base);
    let session = donation_session(DonationType::Monthly, 18.0, "https://example.org");

    let created = session.async_post(&creds).await.unwrap();
    assert_eq!(created.url.as_deref(), Some("https://pay.example/sess_2"));

    let request = captured.recv().unwrap();
    assert!(request.contains("mode=subscription"));
    assert!(request.contains("line_items%5B0%5D%5Bprice_data%5D%5Brecurring%5D%5Binterval%5D=month"));
}
