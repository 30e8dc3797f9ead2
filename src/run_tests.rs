//! Tests for the run module.

use super::*;

use tempfile::TempDir;
use typed_webhooks::webhook::{DeliveryError, registry};

mod sample_record {
    use super::*;

    #[test]
    fn default_matches_demo_values() {
        let record = SampleRecord::default();

        assert_eq!(record.id, 1);
        assert_eq!(record.name, "Test");
        assert_eq!(record.description, "This is a test");
        assert!((record.number - 42.0).abs() < f64::EPSILON);
    }
}

mod extensions {
    use super::*;

    #[test]
    fn register_adds_file_and_xml() {
        register_extensions();

        let registry = registry::snapshot();
        assert!(registry.get_deliverer(FILE_DELIVERER).is_ok());
        assert!(registry.get_serializer(XML_SERIALIZER).is_ok());
        assert!(registry.get_deliverer("http").is_ok());
    }
}

mod execute {
    use super::*;

    #[test]
    fn file_delivery_writes_sample_as_xml() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::default()
            .with_deliverer(FILE_DELIVERER)
            .with_serializer(XML_SERIALIZER)
            .with_file_output_dir(dir.path());

        execute(&settings).unwrap();

        let content = std::fs::read_to_string(dir.path().join("webhook.xml")).unwrap();
        assert!(content.contains("<id>1</id>"));
        assert!(content.contains("<name>Test</name>"));
        assert!(content.contains("<description>This is a test</description>"));
        assert!(content.contains("<number>42.0</number>"));
    }

    #[test]
    fn unknown_deliverer_is_resolution_error() {
        let err = execute(&Settings::default().with_deliverer("smtp")).unwrap_err();

        assert!(matches!(&err, WebhookError::InvalidDeliverer(name) if name == "smtp"));
        assert!(err.is_resolution());
    }

    #[test]
    fn mismatched_pair_is_resolution_error() {
        let settings = Settings::default().with_serializer(XML_SERIALIZER);

        let err = execute(&settings).unwrap_err();

        assert!(matches!(err, WebhookError::InvalidFormat { .. }));
        assert!(err.is_resolution());
    }

    #[test]
    fn http_without_url_fails_at_delivery() {
        let err = execute(&Settings::default()).unwrap_err();

        assert!(matches!(
            err,
            WebhookError::Delivery(DeliveryError::MissingUrl)
        ));
        assert!(!err.is_resolution());
    }
}
