//! Response assertions over captured responses.
//!
//! Each check is a pure function from a [`ResponseSnapshot`] (plus
//! parameters) to a [`CheckOutcome`] title/verdict pair; the host test
//! facility turns the pair into a reported test. No I/O happens here - the
//! snapshot is whatever the host already fetched.

pub mod assertions;
pub mod response;

pub use assertions::{
    check_body_matches, check_empty_body, check_empty_sequence_field, check_header,
    check_invalid_characters, check_json_body, check_location_header, check_matches_request,
    check_not_empty_body, check_property, check_response_time, check_status, check_unique_values,
    check_unique_values_in_path, CheckOutcome,
};
pub use response::{Header, ResponseSnapshot};
