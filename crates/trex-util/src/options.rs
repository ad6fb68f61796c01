//! The option record consumed by compile and by every run.
//!
//! The option set is closed; anything else a caller might want is not
//! an option but a different operation. `dotall` and `capture` are
//! compiled into the NFA; the rest are read per run. A runtime
//! `capture` may only further restrict the compiled one.

use std::time::Duration;

use crate::capture::CaptureKey;
use crate::error::OptionError;

/// Payload form of captures in results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReturnForm {
    /// `(pos, len)` extents in code points.
    #[default]
    Index,
    /// The matched text itself.
    Binary,
}

/// Which captures to expose in results.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CaptureFilter {
    /// Every ordinal and label.
    #[default]
    All,
    /// Only labelled keys.
    Named,
    /// Only key 0 (the whole input).
    None,
    /// An explicit key list.
    Keys(Vec<CaptureKey>),
}

impl CaptureFilter {
    /// True if `key` passes the filter. Key 0 always passes.
    pub fn admits(&self, key: &CaptureKey) -> bool {
        if *key == CaptureKey::Index(0) {
            return true;
        }
        match self {
            CaptureFilter::All => true,
            CaptureFilter::Named => matches!(key, CaptureKey::Label(_)),
            CaptureFilter::None => false,
            CaptureFilter::Keys(keys) => keys.contains(key),
        }
    }
}

/// How many results a run reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Multiple {
    /// Stop at the first success.
    #[default]
    One,
    /// Enumerate every distinct success.
    All,
}

/// The full option record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// If true, `.` matches `\n`.
    pub dotall: bool,
    /// Capture payload form.
    pub return_form: ReturnForm,
    /// Which captures to expose.
    pub capture: CaptureFilter,
    /// Executor timeout for one run.
    pub timeout: Duration,
    /// One result or all results.
    pub multiple: Multiple,
    /// Initial position, in code points.
    pub offset: usize,
    /// Name for graph export, if any.
    pub graph_name: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dotall: false,
            return_form: ReturnForm::default(),
            capture: CaptureFilter::default(),
            timeout: Duration::from_millis(1000),
            multiple: Multiple::default(),
            offset: 0,
            graph_name: None,
        }
    }
}

impl Options {
    /// Validate the options against an input of `input_len` code points.
    ///
    /// Raised before any traversal starts.
    pub fn validate_for_input(&self, input_len: usize) -> Result<(), OptionError> {
        if self.timeout.is_zero() {
            return Err(OptionError::ZeroTimeout);
        }
        if self.offset > input_len {
            return Err(OptionError::OffsetPastEnd {
                offset: self.offset,
                len: input_len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_ones() {
        let opts = Options::default();
        assert!(!opts.dotall);
        assert_eq!(opts.return_form, ReturnForm::Index);
        assert_eq!(opts.capture, CaptureFilter::All);
        assert_eq!(opts.timeout, Duration::from_millis(1000));
        assert_eq!(opts.multiple, Multiple::One);
        assert_eq!(opts.offset, 0);
        assert!(opts.graph_name.is_none());
    }

    #[test]
    fn offset_past_end_is_rejected() {
        let opts = Options {
            offset: 5,
            ..Options::default()
        };
        assert!(matches!(
            opts.validate_for_input(4),
            Err(OptionError::OffsetPastEnd { offset: 5, len: 4 })
        ));
        assert!(opts.validate_for_input(5).is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let opts = Options {
            timeout: Duration::ZERO,
            ..Options::default()
        };
        assert!(matches!(
            opts.validate_for_input(0),
            Err(OptionError::ZeroTimeout)
        ));
    }

    #[test]
    fn filter_always_admits_key_zero() {
        assert!(CaptureFilter::None.admits(&CaptureKey::Index(0)));
        assert!(!CaptureFilter::None.admits(&CaptureKey::Index(1)));
    }

    #[test]
    fn named_filter_admits_labels_only() {
        let filter = CaptureFilter::Named;
        assert!(filter.admits(&CaptureKey::Label("x".to_string())));
        assert!(!filter.admits(&CaptureKey::Index(2)));
    }

    #[test]
    fn key_list_filter() {
        let filter = CaptureFilter::Keys(vec![CaptureKey::Index(2)]);
        assert!(filter.admits(&CaptureKey::Index(2)));
        assert!(!filter.admits(&CaptureKey::Index(1)));
    }
}
