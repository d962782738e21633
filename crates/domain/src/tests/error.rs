// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidRecordStatus {
        status: String::from("pending"),
    };
    assert_eq!(format!("{err}"), "Invalid record status: 'pending'");

    let err: DomainError = DomainError::StepOutOfRange { step: 5, len: 4 };
    assert_eq!(
        format!("{err}"),
        "Step 5 is out of range. Must be between 1 and 4"
    );

    let err: DomainError = DomainError::FormNotAnObject { kind: "asset" };
    assert_eq!(
        format!("{err}"),
        "Form for asset did not serialize to an object"
    );

    let err: DomainError = DomainError::ProjectionFailed {
        kind: "asset",
        error: String::from("invalid type"),
    };
    assert_eq!(
        format!("{err}"),
        "Failed to project asset record into form: invalid type"
    );

    let err: DomainError = DomainError::UnknownField {
        kind: "asset",
        field: String::from("colour"),
    };
    assert_eq!(
        format!("{err}"),
        "Field 'colour' is not part of the asset form"
    );

    let err: DomainError = DomainError::EmptyRecordId;
    assert_eq!(format!("{err}"), "Record identifier cannot be empty");
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::EmptyRecordId);
    assert!(err.source().is_none());
}
