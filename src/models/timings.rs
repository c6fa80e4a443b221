//! Per-phase timing breakdown of a captured transaction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Timing breakdown for one request/response cycle, in milliseconds.
///
/// Each phase is optional. A negative value is the trace's way of saying the
/// phase does not apply or was not measured (HAR uses `-1`). Phases the
/// trace carries beyond the standard ones (e.g. Chrome's
/// `_blocked_queueing`) are kept in `extra` and take part in the total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    /// Time spent in a queue waiting for a network connection.
    pub blocked: Option<f64>,

    /// DNS resolution time.
    pub dns: Option<f64>,

    /// Time required to create the TCP connection.
    pub connect: Option<f64>,

    /// Time required for the SSL/TLS negotiation.
    pub ssl: Option<f64>,

    /// Time required to send the request to the server.
    pub send: Option<f64>,

    /// Waiting for a response from the server (time to first byte).
    pub wait: Option<f64>,

    /// Time required to read the entire response.
    pub receive: Option<f64>,

    /// Additional numeric phases, keyed by their name in the trace.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, f64>,
}

impl Timings {
    /// Creates an empty timing breakdown with no measured phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a phase by its trace name.
    ///
    /// Unknown names are stored as extra phases.
    pub fn set_phase(&mut self, name: &str, millis: f64) {
        match name {
            "blocked" => self.blocked = Some(millis),
            "dns" => self.dns = Some(millis),
            "connect" => self.connect = Some(millis),
            "ssl" => self.ssl = Some(millis),
            "send" => self.send = Some(millis),
            "wait" => self.wait = Some(millis),
            "receive" => self.receive = Some(millis),
            other => {
                self.extra.insert(other.to_string(), millis);
            }
        }
    }

    /// Iterates over every phase present in the breakdown.
    pub fn phases(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        let standard = [
            ("blocked", self.blocked),
            ("dns", self.dns),
            ("connect", self.connect),
            ("ssl", self.ssl),
            ("send", self.send),
            ("wait", self.wait),
            ("receive", self.receive),
        ];

        standard
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .chain(self.extra.iter().map(|(name, v)| (name.as_str(), *v)))
    }

    /// Total duration of the transaction in milliseconds.
    ///
    /// Sums every phase strictly greater than zero. Missing phases and the
    /// negative "not measured" sentinel contribute nothing, so this never
    /// fails and never goes negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use har_analyzer::models::Timings;
    ///
    /// let mut timings = Timings::new();
    /// timings.dns = Some(-1.0);
    /// timings.connect = Some(5.0);
    /// timings.wait = Some(10.0);
    /// assert_eq!(timings.total_duration(), 15.0);
    /// ```
    pub fn total_duration(&self) -> f64 {
        self.phases()
            .map(|(_, value)| value)
            .filter(|value| *value > 0.0)
            .sum()
    }
}
