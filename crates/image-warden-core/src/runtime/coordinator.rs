// crates/image-warden-core/src/runtime/coordinator.rs
// ============================================================================
// Module: Image Warden Batch Coordinator
// Description: Sequential pipeline execution over one batch of raw records.
// Purpose: Produce the ordered batch result and summary counts.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The coordinator sequences normalize, validate, resolve, evaluate, and
//! dispatch over every input record in order. Admission-filtered records are
//! excluded from the report by design; normalization failures are reported as
//! a distinct outcome category. The per-stream cache lives here, scoped to
//! one batch run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::record::RawRecord;
use crate::core::report::BatchResult;
use crate::core::report::BatchSummary;
use crate::core::report::EvaluatedRecord;
use crate::core::report::RecordReport;
use crate::core::verdict::ComplianceVerdict;
use crate::interfaces::PlatformALookup;
use crate::interfaces::PlatformBLookup;
use crate::interfaces::RemediationTrigger;
use crate::interfaces::VersionAuthority;
use crate::runtime::dispatcher::RemediationDispatcher;
use crate::runtime::evaluator::evaluate;
use crate::runtime::normalizer::Admission;
use crate::runtime::normalizer::normalize;
use crate::runtime::resolver::StreamCache;
use crate::runtime::resolver::VersionResolver;
use crate::runtime::validator::PlatformValidator;

// ============================================================================
// SECTION: Batch Coordinator
// ============================================================================

/// Coordinator sequencing all pipeline stages over one batch.
pub struct BatchCoordinator<A, B, V, T> {
    /// Platform liveness validator.
    validator: PlatformValidator<A, B>,
    /// Cached version resolver.
    resolver: VersionResolver<V>,
    /// Gated remediation dispatcher.
    dispatcher: RemediationDispatcher<T>,
}

impl<A, B, V, T> BatchCoordinator<A, B, V, T>
where
    A: PlatformALookup,
    B: PlatformBLookup,
    V: VersionAuthority,
    T: RemediationTrigger,
{
    /// Creates a coordinator over the assembled pipeline stages.
    #[must_use]
    pub const fn new(
        validator: PlatformValidator<A, B>,
        resolver: VersionResolver<V>,
        dispatcher: RemediationDispatcher<T>,
    ) -> Self {
        Self {
            validator,
            resolver,
            dispatcher,
        }
    }

    /// Runs the pipeline over one batch of raw records.
    ///
    /// Processing is sequential and deterministic; output order equals input
    /// order. No per-record failure aborts the batch.
    #[must_use]
    pub fn run(&self, records: &[RawRecord]) -> BatchResult {
        let mut cache = StreamCache::new();
        let mut reports = Vec::new();

        for (input_index, raw) in records.iter().enumerate() {
            match normalize(raw) {
                Admission::Filtered(_) => {}
                Admission::Rejected(error) => {
                    reports.push(RecordReport::Rejected {
                        input_index,
                        error,
                    });
                }
                Admission::Admitted(descriptor) => {
                    let validation = self.validator.validate(&descriptor);
                    let verdict = match self.resolver.resolve(&mut cache, &descriptor.stream_key)
                    {
                        Ok(record) => evaluate(&descriptor, &record),
                        Err(_) => ComplianceVerdict::unresolved(),
                    };
                    let remediation =
                        self.dispatcher.dispatch(&descriptor, &validation, &verdict);
                    reports.push(RecordReport::Evaluated {
                        input_index,
                        record: EvaluatedRecord {
                            descriptor,
                            validation,
                            verdict,
                            remediation,
                        },
                    });
                }
            }
        }

        let summary = BatchSummary::from_reports(
            &reports,
            self.dispatcher.live_mode(),
            self.dispatcher.branch().to_string(),
        );
        BatchResult {
            records: reports,
            summary,
        }
    }
}
