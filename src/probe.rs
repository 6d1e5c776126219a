//! Liveness probe for the notebook server

use std::time::Duration;

use crate::error::{GlueError, Result};

/// Checks whether a service accepts HTTP connections
pub trait HealthProbe {
    /// `Ok` when a response arrived, whatever its status code
    fn probe(&self, url: &str) -> Result<()>;
}

/// Blocking HTTP probe
pub struct HttpProbe {
    client: reqwest::blocking::Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| GlueError::Probe(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HealthProbe for HttpProbe {
    fn probe(&self, url: &str) -> Result<()> {
        // Jupyter may answer 302/403 before a session exists; any response
        // means the server is up.
        self.client
            .get(url)
            .send()
            .map(|_| ())
            .map_err(|e| GlueError::Probe(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_probe_refused_connection() {
        // Bind then drop to get a port nothing listens on
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let probe = HttpProbe::new(Duration::from_secs(2)).unwrap();
        let result = probe.probe(&format!("http://127.0.0.1:{}", port));
        assert!(matches!(result, Err(GlueError::Probe(_))));
    }

    #[test]
    fn test_probe_ignores_status_code() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            stream
                .write_all(b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .unwrap();
        });

        let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();
        assert!(probe.probe(&format!("http://127.0.0.1:{}", port)).is_ok());
        server.join().unwrap();
    }
}
