//! Submission lifecycle behind the contact modal

use crate::error::{ContactError, ContactResult};
use crate::form::{ContactForm, Field, FieldErrors};
use crate::relay::MessageRelay;
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// How long the success or failure banner stays up
pub const DEFAULT_BANNER_DURATION: Duration = Duration::from_secs(3);

/// Where a submission stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Nothing in flight, no banner
    #[default]
    Idle,
    /// Request in flight; inputs are disabled
    Submitting,
    /// Delivered; success banner
    Success,
    /// Not delivered; failure banner
    Failure,
}

impl SubmissionStatus {
    /// Translation key of the banner title, if a banner shows
    pub fn banner_title_key(self) -> Option<&'static str> {
        match self {
            Self::Success => Some("contact.modal.status.success.title"),
            Self::Failure => Some("contact.modal.status.error.title"),
            Self::Idle | Self::Submitting => None,
        }
    }

    /// Translation key of the banner description, if a banner shows
    pub fn banner_description_key(self) -> Option<&'static str> {
        match self {
            Self::Success => Some("contact.modal.status.success.description"),
            Self::Failure => Some("contact.modal.status.error.description"),
            Self::Idle | Self::Submitting => None,
        }
    }

    /// Whether the form accepts input
    pub fn is_editable(self) -> bool {
        self != Self::Submitting
    }
}

/// Owns the form, its field errors and the submission status
///
/// Success and failure are shown for the banner duration and then fall back
/// to [`SubmissionStatus::Idle`]. A submission is attempted exactly once.
pub struct ContactController {
    relay: Arc<dyn MessageRelay>,
    form: Mutex<ContactForm>,
    errors: Mutex<FieldErrors>,
    status: Arc<watch::Sender<SubmissionStatus>>,
    banner: Duration,
    reset_task: Mutex<Option<JoinHandle<()>>>,
}

impl fmt::Debug for ContactController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactController")
            .field("status", &self.status())
            .field("banner", &self.banner)
            .finish_non_exhaustive()
    }
}

impl ContactController {
    /// Controller submitting through `relay` with the default banner duration
    pub fn new(relay: Arc<dyn MessageRelay>) -> Self {
        Self::with_banner_duration(relay, DEFAULT_BANNER_DURATION)
    }

    /// Controller with a custom banner duration
    pub fn with_banner_duration(relay: Arc<dyn MessageRelay>, banner: Duration) -> Self {
        let (status, _) = watch::channel(SubmissionStatus::Idle);
        Self {
            relay,
            form: Mutex::new(ContactForm::default()),
            errors: Mutex::new(FieldErrors::default()),
            status: Arc::new(status),
            banner,
            reset_task: Mutex::new(None),
        }
    }

    /// Current status
    pub fn status(&self) -> SubmissionStatus {
        *self.status.borrow()
    }

    /// Receiver notified on every status change
    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status.subscribe()
    }

    /// Whether the relay can deliver at all; drives the configuration warning
    pub fn relay_configured(&self) -> bool {
        self.relay.is_configured()
    }

    /// Copy of the form
    pub fn form(&self) -> ContactForm {
        self.form.lock().clone()
    }

    /// Errors from the last validation
    pub fn field_errors(&self) -> FieldErrors {
        self.errors.lock().clone()
    }

    /// Edit one field; its pending error is cleared
    pub fn update_field(&self, field: Field, value: impl Into<String>) {
        self.form.lock().set(field, value);
        self.errors.lock().clear(field);
    }

    /// Replace the whole form
    pub fn set_form(&self, form: ContactForm) {
        *self.form.lock() = form;
        *self.errors.lock() = FieldErrors::default();
    }

    /// Validate and deliver the form
    ///
    /// Validation failures leave the status at idle and return the field
    /// errors. Otherwise the relay is called once; success clears the form.
    /// Either outcome shows its banner and is reset to idle afterwards. Must
    /// be called within a tokio runtime.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> ContactResult<()> {
        if self.status() == SubmissionStatus::Submitting {
            return Err(ContactError::InProgress);
        }

        let form = self.form();
        if let Err(errors) = form.validate() {
            debug!("Contact form has {} invalid fields", errors.len());
            *self.errors.lock() = errors.clone();
            return Err(ContactError::Invalid(errors));
        }
        *self.errors.lock() = FieldErrors::default();

        let claimed = self.status.send_if_modified(|status| {
            if *status == SubmissionStatus::Submitting {
                return false;
            }
            *status = SubmissionStatus::Submitting;
            true
        });
        if !claimed {
            return Err(ContactError::InProgress);
        }
        self.cancel_reset();
        let mut in_flight = InFlight {
            status: &self.status,
            settled: false,
        };

        let result = if self.relay.is_configured() {
            self.relay.submit(&form).await
        } else {
            warn!("Contact relay is not configured");
            Err(ContactError::NotConfigured)
        };

        in_flight.settled = true;
        match &result {
            Ok(()) => {
                info!("Contact form submitted");
                self.form.lock().clear();
                self.finish(SubmissionStatus::Success);
            }
            Err(e) => {
                warn!("Contact form submission failed: {}", e);
                self.finish(SubmissionStatus::Failure);
            }
        }
        result
    }

    fn finish(&self, outcome: SubmissionStatus) {
        self.status.send_replace(outcome);

        let status = Arc::clone(&self.status);
        let banner = self.banner;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(banner).await;
            status.send_replace(SubmissionStatus::Idle);
        });
        if let Some(previous) = self.reset_task.lock().replace(handle) {
            previous.abort();
        }
    }

    fn cancel_reset(&self) {
        if let Some(handle) = self.reset_task.lock().take() {
            handle.abort();
        }
    }
}

/// Puts the status back to idle when a submission is dropped mid-request
struct InFlight<'a> {
    status: &'a watch::Sender<SubmissionStatus>,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        debug!("Contact submission abandoned before the relay answered");
        self.status.send_if_modified(|status| {
            if *status != SubmissionStatus::Submitting {
                return false;
            }
            *status = SubmissionStatus::Idle;
            true
        });
    }
}

impl Drop for ContactController {
    fn drop(&mut self) {
        self.cancel_reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::MockMessageRelay;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct SlowRelay;

    #[async_trait]
    impl MessageRelay for SlowRelay {
        fn is_configured(&self) -> bool {
            true
        }

        async fn submit(&self, _form: &ContactForm) -> ContactResult<()> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(())
        }
    }

    fn filled(controller: &ContactController) {
        controller.set_form(ContactForm::new(
            "Ana",
            "ana@example.com",
            "Proyecto",
            "Quiero contarte sobre un proyecto",
        ));
    }

    fn relay(outcome: fn() -> ContactResult<()>) -> MockMessageRelay {
        let mut relay = MockMessageRelay::new();
        relay.expect_is_configured().return_const(true);
        relay.expect_submit().times(1).returning(move |_| outcome());
        relay
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_clears_form_and_resets() {
        let controller = ContactController::new(Arc::new(relay(|| Ok(()))));
        filled(&controller);
        let mut rx = controller.subscribe();

        controller.submit().await.unwrap();
        assert_eq!(controller.status(), SubmissionStatus::Success);
        assert_eq!(controller.form(), ContactForm::default());

        rx.wait_for(|s| *s == SubmissionStatus::Idle).await.unwrap();
        assert_eq!(controller.status(), SubmissionStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_form_and_resets_after_banner() {
        let controller = ContactController::with_banner_duration(
            Arc::new(relay(|| {
                Err(ContactError::Rejected {
                    status: 422,
                    body: "{}".to_string(),
                })
            })),
            Duration::from_secs(5),
        );
        filled(&controller);

        let err = controller.submit().await.unwrap_err();
        assert!(matches!(err, ContactError::Rejected { status: 422, .. }));
        assert_eq!(controller.status(), SubmissionStatus::Failure);
        assert_eq!(controller.form().name, "Ana");

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(controller.status(), SubmissionStatus::Failure);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(controller.status(), SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_relay() {
        let mut relay = MockMessageRelay::new();
        relay.expect_submit().never();
        let controller = ContactController::new(Arc::new(relay));
        controller.update_field(Field::Email, "not-an-email");

        let err = controller.submit().await.unwrap_err();
        let ContactError::Invalid(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.len(), 4);
        assert_eq!(controller.status(), SubmissionStatus::Idle);

        controller.update_field(Field::Email, "ana@example.com");
        assert_eq!(controller.field_errors().get(Field::Email), None);
        assert_eq!(controller.field_errors().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unconfigured_relay_fails_without_request() {
        let mut relay = MockMessageRelay::new();
        relay.expect_is_configured().return_const(false);
        relay.expect_submit().never();
        let controller = ContactController::new(Arc::new(relay));
        filled(&controller);

        assert!(matches!(controller.submit().await, Err(ContactError::NotConfigured)));
        assert_eq!(controller.status(), SubmissionStatus::Failure);
        assert!(!controller.relay_configured());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_submission_can_be_retried() {
        let controller = ContactController::new(Arc::new(SlowRelay));
        filled(&controller);

        let timed_out = tokio::time::timeout(Duration::from_millis(5), controller.submit()).await;
        assert!(timed_out.is_err());
        assert_eq!(controller.status(), SubmissionStatus::Idle);
        assert_eq!(controller.form().name, "Ana");

        controller.submit().await.unwrap();
        assert_eq!(controller.status(), SubmissionStatus::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_while_in_flight_is_refused() {
        let controller = ContactController::new(Arc::new(SlowRelay));
        filled(&controller);

        let (first, second) = tokio::join!(controller.submit(), controller.submit());
        assert!(first.is_ok());
        assert!(matches!(second, Err(ContactError::InProgress)));
        assert_eq!(controller.status(), SubmissionStatus::Success);
    }

    #[test]
    fn test_banner_keys() {
        assert_eq!(
            SubmissionStatus::Success.banner_title_key(),
            Some("contact.modal.status.success.title")
        );
        assert_eq!(SubmissionStatus::Submitting.banner_description_key(), None);
        assert!(!SubmissionStatus::Submitting.is_editable());
    }
}
