// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use std::{borrow::Cow, fmt::Debug};

use crate::StatusTracker;

/// Detailed information about a validation failure or other noteworthy
/// condition.
///
/// Use the [`log_item`](crate::log_item) macro to create a `LogItem`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogItem {
    /// Name of the form field or object this item refers to
    pub label: Cow<'static, str>,

    /// Human-readable description of the condition
    pub description: Cow<'static, str>,

    /// Source file where the condition was detected
    pub file: Cow<'static, str>,

    /// Function where the condition was detected
    pub function: Cow<'static, str>,

    /// Source line number where the condition was detected
    pub line: u32,

    /// Error value, captured via its `Debug` representation
    pub err_val: Option<Cow<'static, str>>,

    /// Validation code (see [`validation_codes`](crate::validation_codes))
    pub validation_status: Option<Cow<'static, str>>,
}

impl LogItem {
    /// Captures the description from the value (typically an error value) as
    /// additional information for this `LogItem` struct.
    ///
    /// ## Example
    ///
    /// ```
    /// # use std::borrow::Cow;
    /// # use mcnl_status_tracker::{log_item, LogItem};
    /// let log = log_item!("assetFile", "File size must be less than 1 GB", "test func")
    ///     .error("too large");
    ///
    /// assert_eq!(log.err_val, Some(Cow::Borrowed("\"too large\"")));
    /// ```
    pub fn error<E: Debug>(self, err: E) -> Self {
        LogItem {
            err_val: Some(format!("{err:?}").into()),
            ..self
        }
    }

    /// Adds a validation code.
    pub fn validation_status(self, status: &'static str) -> Self {
        LogItem {
            validation_status: Some(status.into()),
            ..self
        }
    }

    /// Records this item as a non-error condition.
    pub fn success(self, tracker: &mut StatusTracker) {
        tracker.add_non_error(self);
    }

    /// Records this item as an error condition.
    ///
    /// Returns `Err(err)` when the tracker is configured to stop on the first
    /// error.
    pub fn failure<E: Debug>(self, tracker: &mut StatusTracker, err: E) -> Result<(), E> {
        let item = self.error(&err);
        tracker.add_error(item, err)
    }
}

/// Creates a [`LogItem`] struct that is annotated with the source file and line
/// number where the log condition was discovered.
///
/// Takes three parameters, each of which may be a `'static str` or `String`:
///
/// * `label`: name of the field this item references
/// * `description`: human-readable reason for this `LogItem` to have been
///   generated
/// * `function`: name of the function generating this `LogItem`
///
/// ## Example
///
/// ```
/// # use std::borrow::Cow;
/// # use mcnl_status_tracker::{log_item, LogItem};
/// let log = log_item!("leafCertificate", "This field is required", "validate");
///
/// assert_eq!(
///     log,
///     LogItem {
///         label: Cow::Borrowed("leafCertificate"),
///         description: Cow::Borrowed("This field is required"),
///         file: Cow::Borrowed(file!()),
///         function: Cow::Borrowed("validate"),
///         line: log.line,
///         err_val: None,
///         validation_status: None,
///     }
/// );
/// ```
#[macro_export]
macro_rules! log_item {
    ($label:expr, $description:expr, $function:expr) => {{
        $crate::LogItem {
            label: $label.into(),
            file: file!().into(),
            function: $function.into(),
            line: line!(),
            description: $description.into(),
            err_val: None,
            validation_status: None,
        }
    }};
}
