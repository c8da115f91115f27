//! Blocking poll primitive
//!
//! Every "wait until the hardware flag flips" loop goes through
//! [`poll_until`], so the wait can be bounded without touching drivers.

/// How long a blocking poll may spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitPolicy {
    /// Spin until the flag flips; a stuck bus hangs the caller
    #[default]
    Forever,
    /// Give up after this many unsuccessful polls
    MaxPolls(u32),
}

impl WaitPolicy {
    /// `MaxPolls(limit)`, with zero meaning no limit
    pub const fn from_limit(limit: u32) -> Self {
        if limit == 0 {
            WaitPolicy::Forever
        } else {
            WaitPolicy::MaxPolls(limit)
        }
    }
}

/// The wait policy ran out before the hardware answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollTimeout;

/// Spin on `ready` until it returns true or `policy` is exhausted
pub fn poll_until<F>(policy: WaitPolicy, mut ready: F) -> Result<(), PollTimeout>
where
    F: FnMut() -> bool,
{
    match policy {
        WaitPolicy::Forever => {
            while !ready() {
                core::hint::spin_loop();
            }
            Ok(())
        }
        WaitPolicy::MaxPolls(limit) => {
            for _ in 0..limit {
                if ready() {
                    return Ok(());
                }
                core::hint::spin_loop();
            }
            Err(PollTimeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_limit() {
        assert_eq!(WaitPolicy::from_limit(0), WaitPolicy::Forever);
        assert_eq!(WaitPolicy::from_limit(7), WaitPolicy::MaxPolls(7));
    }

    #[test]
    fn test_forever_waits_for_flag() {
        let mut polls = 0;
        let result = poll_until(WaitPolicy::Forever, || {
            polls += 1;
            polls == 50
        });
        assert_eq!(result, Ok(()));
        assert_eq!(polls, 50);
    }

    #[test]
    fn test_bounded_wait_times_out() {
        let mut polls = 0;
        let result = poll_until(WaitPolicy::MaxPolls(10), || {
            polls += 1;
            false
        });
        assert_eq!(result, Err(PollTimeout));
        assert_eq!(polls, 10);
    }

    #[test]
    fn test_bounded_wait_succeeds_early() {
        assert_eq!(poll_until(WaitPolicy::MaxPolls(3), || true), Ok(()));
    }
}
