// src/resolver/events.rs
//! Trial event tokens

use std::str::FromStr;

use crate::config::{constants::fields, UnresolvedPolicy};
use crate::error::SignalResult;
use crate::resolver::{handle_unresolved, UnknownCategory};

/// Known trial events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Trial start
    Start,
    /// Trial end
    End,
    /// Go cue
    GoCue,
    /// Target onset
    TargetOn,
    /// Outer target onset
    OuterTargetOn,
    /// Perturbation bump
    Bump,
    /// Reward delivery
    Reward,
}

impl EventKind {
    /// Every event, in declaration order
    pub const ALL: [EventKind; 7] = [
        EventKind::Start,
        EventKind::End,
        EventKind::GoCue,
        EventKind::TargetOn,
        EventKind::OuterTargetOn,
        EventKind::Bump,
        EventKind::Reward,
    ];

    /// Short token callers write
    pub fn token(self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::End => "end",
            EventKind::GoCue => "go_cue",
            EventKind::TargetOn => "tgt_on",
            EventKind::OuterTargetOn => "ot_on",
            EventKind::Bump => "bump",
            EventKind::Reward => "reward",
        }
    }

    /// Field name of the event timestamp in the trial table
    pub fn output_name(self) -> &'static str {
        match self {
            EventKind::Start => "startTime",
            EventKind::End => "endTime",
            EventKind::GoCue => "goCueTime",
            EventKind::TargetOn => "tgtOnTime",
            EventKind::OuterTargetOn => "otOnTime",
            EventKind::Bump => "bumpTime",
            EventKind::Reward => "rewardTime",
        }
    }
}

impl FromStr for EventKind {
    type Err = UnknownCategory;

    /// Accepts either the short token (`start`) or the output name (`startTime`)
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let normalized = token.to_lowercase();
        EventKind::ALL
            .iter()
            .copied()
            .find(|event| event.token() == normalized || event.output_name().to_lowercase() == normalized)
            .ok_or_else(|| UnknownCategory(token.to_string()))
    }
}

/// An event token and the output name it maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEvent {
    /// Token as the caller wrote it
    pub token: String,
    /// `None` when the token is not a known event
    pub event: Option<EventKind>,
    /// Field name in the trial table
    pub output_name: String,
}

/// Resolve event tokens in input order; unknown tokens pass through verbatim
pub fn resolve_events(tokens: &[String], policy: UnresolvedPolicy) -> SignalResult<Vec<ResolvedEvent>> {
    tokens
        .iter()
        .map(|token| match token.parse::<EventKind>() {
            Ok(event) => Ok(ResolvedEvent {
                token: token.clone(),
                event: Some(event),
                output_name: event.output_name().to_string(),
            }),
            Err(_) => {
                handle_unresolved(policy, fields::EVENT_NAMES, token)?;
                Ok(ResolvedEvent {
                    token: token.clone(),
                    event: None,
                    output_name: token.clone(),
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn tokens(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_events() {
        let resolved = resolve_events(&tokens(&["start", "end"]), UnresolvedPolicy::Error).unwrap();
        let names: Vec<_> = resolved.iter().map(|e| e.output_name.as_str()).collect();
        assert_eq!(names, vec!["startTime", "endTime"]);
    }

    #[test]
    fn test_output_name_accepted_as_token() {
        assert_eq!("goCueTime".parse::<EventKind>(), Ok(EventKind::GoCue));
        assert_eq!("GO_CUE".parse::<EventKind>(), Ok(EventKind::GoCue));
    }

    #[test]
    fn test_unknown_event_passthrough() {
        let resolved = resolve_events(&tokens(&["lever_press"]), UnresolvedPolicy::Ignore).unwrap();
        assert_eq!(resolved[0].output_name, "lever_press");
        assert!(resolved[0].event.is_none());

        let err = resolve_events(&tokens(&["lever_press"]), UnresolvedPolicy::Error).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnresolvedCategory);
    }
}
