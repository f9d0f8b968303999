//! SSDP (Simple Service Discovery Protocol) search.
//!
//! Sends one `M-SEARCH` datagram and collects every answer that arrives
//! before the window closes. Only used at construction time.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::Instant;
use url::Url;

use crate::error::WemoError;

/// Standard SSDP multicast group and port.
pub(crate) const MULTICAST_ADDR: &str = "239.255.255.250:1900";

/// The headers of an SSDP answer we care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SsdpResponse {
    pub location: String,
    pub usn: String,
}

impl SsdpResponse {
    /// `host:port` of the advertised description URL.
    pub fn host_port(&self) -> Option<String> {
        let url = Url::parse(&self.location).ok()?;
        let host = url.host_str()?;
        let port = url.port_or_known_default()?;
        Some(format!("{host}:{port}"))
    }
}

/// Search `target` for `urn` and collect answers for `window`.
pub(crate) async fn search(
    target: &str,
    urn: &str,
    window: Duration,
) -> Result<Vec<SsdpResponse>, WemoError> {
    let socket = UdpSocket::bind("0.0.0.0:0")
        .await
        .map_err(WemoError::Socket)?;
    let target: SocketAddr = target
        .parse()
        .map_err(|_| WemoError::InvalidAddress(target.to_string()))?;

    socket
        .send_to(m_search(urn).as_bytes(), target)
        .await
        .map_err(WemoError::Socket)?;

    let deadline = Instant::now() + window;
    let mut buffer = [0u8; 2048];
    let mut responses = Vec::new();

    loop {
        match tokio::time::timeout_at(deadline, socket.recv_from(&mut buffer)).await {
            Err(_elapsed) => break,
            Ok(Err(err)) => return Err(WemoError::Socket(err)),
            Ok(Ok((size, from))) => {
                let Ok(text) = std::str::from_utf8(&buffer[..size]) else {
                    tracing::trace!(%from, "skipping non-UTF-8 SSDP datagram");
                    continue;
                };
                match parse_response(text) {
                    Some(response) => responses.push(response),
                    None => tracing::trace!(%from, "skipping unparseable SSDP datagram"),
                }
            }
        }
    }

    Ok(responses)
}

fn m_search(urn: &str) -> String {
    format!(
        "M-SEARCH * HTTP/1.1\r\n\
         HOST: {MULTICAST_ADDR}\r\n\
         MAN: \"ssdp:discover\"\r\n\
         MX: 2\r\n\
         ST: {urn}\r\n\
         USER-AGENT: gohome/0.1 UPnP/1.0\r\n\
         \r\n"
    )
}

/// Parse an SSDP answer; `None` unless both `LOCATION` and `USN` are present.
fn parse_response(text: &str) -> Option<SsdpResponse> {
    let mut location = None;
    let mut usn = None;

    for line in text.lines() {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if name.trim().eq_ignore_ascii_case("LOCATION") {
            location = Some(value.to_string());
        } else if name.trim().eq_ignore_ascii_case("USN") {
            usn = Some(value.to_string());
        }
    }

    Some(SsdpResponse {
        location: location?,
        usn: usn?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEMO_ANSWER: &str = "HTTP/1.1 200 OK\r\n\
        CACHE-CONTROL: max-age=86400\r\n\
        LOCATION: http://192.168.1.40:49153/setup.xml\r\n\
        SERVER: Unspecified, UPnP/1.0, Unspecified\r\n\
        ST: urn:Belkin:service:basicevent:1\r\n\
        USN: uuid:Socket-1_0-221517K0101769::urn:Belkin:service:basicevent:1\r\n\
        \r\n";

    #[test]
    fn should_parse_location_and_usn() {
        let parsed = parse_response(WEMO_ANSWER).unwrap();
        assert_eq!(parsed.location, "http://192.168.1.40:49153/setup.xml");
        assert!(parsed.usn.ends_with("urn:Belkin:service:basicevent:1"));
        assert_eq!(parsed.host_port().as_deref(), Some("192.168.1.40:49153"));
    }

    #[test]
    fn should_parse_headers_case_insensitively() {
        let text = "HTTP/1.1 200 OK\r\nlocation: http://10.0.0.9/setup.xml\r\nusn: uuid:x\r\n\r\n";
        let parsed = parse_response(text).unwrap();
        assert_eq!(parsed.host_port().as_deref(), Some("10.0.0.9:80"));
    }

    #[test]
    fn should_reject_answer_without_usn() {
        let text = "HTTP/1.1 200 OK\r\nLOCATION: http://10.0.0.9/setup.xml\r\n\r\n";
        assert!(parse_response(text).is_none());
    }

    #[test]
    fn should_not_derive_host_from_garbage_location() {
        let response = SsdpResponse {
            location: "not a url".to_string(),
            usn: "uuid:x".to_string(),
        };
        assert!(response.host_port().is_none());
    }

    #[test]
    fn should_build_m_search_for_urn() {
        let request = m_search("urn:Belkin:service:basicevent:1");
        assert!(request.starts_with("M-SEARCH * HTTP/1.1\r\n"));
        assert!(request.contains("ST: urn:Belkin:service:basicevent:1\r\n"));
        assert!(request.contains("MAN: \"ssdp:discover\"\r\n"));
        assert!(request.ends_with("\r\n\r\n"));
    }

    #[tokio::test]
    async fn should_collect_answers_until_window_closes() {
        let responder = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target = responder.local_addr().unwrap().to_string();

        tokio::spawn(async move {
            let mut buffer = [0u8; 2048];
            let (_, from) = responder.recv_from(&mut buffer).await.unwrap();
            responder
                .send_to(WEMO_ANSWER.as_bytes(), from)
                .await
                .unwrap();
            responder.send_to(b"garbage", from).await.unwrap();
        });

        let responses = search(
            &target,
            "urn:Belkin:service:basicevent:1",
            Duration::from_millis(300),
        )
        .await
        .unwrap();

        assert_eq!(responses.len(), 1);
        assert_eq!(
            responses[0].host_port().as_deref(),
            Some("192.168.1.40:49153")
        );
    }

    #[tokio::test]
    async fn should_reject_invalid_target_address() {
        let result = search("not-an-address", "urn:x", Duration::from_millis(10)).await;
        assert!(matches!(result, Err(WemoError::InvalidAddress(_))));
    }
}
