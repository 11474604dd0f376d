//! Task lifecycle
//!
//! Every exercise in the suite runs through the same four stages:
//! validate (local shape check, no side effects), pre-process (parse
//! and, for parallel tasks, distribute), run (the actual computation)
//! and post-process (extract the output). [`LifecycleTask::execute`]
//! drives the stages in order and stops at the first failure.

use tracing::debug;
use vstripe_comm::Communicator;
use vstripe_matrix::AugmentedMatrix;
use vstripe_solver::{SequentialSolver, StripedSolver};

use crate::error::{HarnessError, Result};
use crate::input;

/// The validate / pre-process / run / post-process contract.
pub trait LifecycleTask {
    /// Cheap local input check; must not communicate or mutate state.
    fn validate(&self) -> bool;

    /// Parse and stage the input (allocation, distribution).
    fn pre_process(&mut self) -> Result<()>;

    /// Execute the computation.
    fn run(&mut self) -> Result<()>;

    /// Extract the final output.
    fn post_process(&mut self) -> Result<()>;

    /// The output produced by `post_process`.
    fn output(&self) -> &[f64];

    /// Drive all four stages in order.
    fn execute(&mut self) -> Result<Vec<f64>> {
        if !self.validate() {
            return Err(HarnessError::ValidationFailed);
        }
        self.pre_process()?;
        self.run()?;
        self.post_process()?;
        Ok(self.output().to_vec())
    }
}

/// Sequential Gaussian-elimination task (single-process reference).
pub struct GaussSeqTask {
    input: Vec<f64>,
    matrix: Option<AugmentedMatrix>,
    solution: Vec<f64>,
    output: Vec<f64>,
}

impl GaussSeqTask {
    pub fn new(input: Vec<f64>) -> Self {
        Self {
            input,
            matrix: None,
            solution: Vec::new(),
            output: Vec::new(),
        }
    }
}

impl LifecycleTask for GaussSeqTask {
    fn validate(&self) -> bool {
        input::validate(&self.input)
    }

    fn pre_process(&mut self) -> Result<()> {
        self.matrix = Some(input::parse(&self.input)?);
        Ok(())
    }

    fn run(&mut self) -> Result<()> {
        let matrix = self.matrix.as_ref().ok_or(HarnessError::ValidationFailed)?;
        self.solution = SequentialSolver::new().solve(matrix)?;
        Ok(())
    }

    fn post_process(&mut self) -> Result<()> {
        self.output = std::mem::take(&mut self.solution);
        Ok(())
    }

    fn output(&self) -> &[f64] {
        &self.output
    }
}

/// Column-striped Gaussian-elimination task; one instance runs on each
/// worker of the SPMD group. Only the coordinator's instance carries
/// the input; everyone ends up with the broadcast solution.
pub struct GaussStripedTask<C> {
    solver: StripedSolver<C>,
    input: Vec<f64>,
    local: Option<AugmentedMatrix>,
    solution: Vec<f64>,
    output: Vec<f64>,
}

impl<C: Communicator> GaussStripedTask<C> {
    /// `input` is only inspected on the coordinator; other ranks may
    /// pass an empty buffer.
    pub fn new(comm: C, input: Vec<f64>) -> Self {
        Self {
            solver: StripedSolver::new(comm),
            input,
            local: None,
            solution: Vec::new(),
            output: Vec::new(),
        }
    }
}

impl<C: Communicator> LifecycleTask for GaussStripedTask<C> {
    fn validate(&self) -> bool {
        // Validation is local to the coordinator; peers have no input
        // to check and accept.
        if self.solver.comm().is_coordinator() {
            input::validate(&self.input)
        } else {
            true
        }
    }

    fn pre_process(&mut self) -> Result<()> {
        let parsed = if self.solver.comm().is_coordinator() {
            Some(input::parse(&self.input)?)
        } else {
            None
        };
        debug!(
            rank = self.solver.comm().rank(),
            "distributing matrix replica"
        );
        self.local = Some(self.solver.distribute(parsed.as_ref())?);
        Ok(())
    }

    fn run(&mut self) -> Result<()> {
        let local = self.local.as_mut().ok_or(HarnessError::ValidationFailed)?;
        self.solution = self.solver.run(local)?;
        Ok(())
    }

    fn post_process(&mut self) -> Result<()> {
        // The solution was already broadcast at the end of the run
        // stage; extraction is all that is left.
        self.output = std::mem::take(&mut self.solution);
        Ok(())
    }

    fn output(&self) -> &[f64] {
        &self.output
    }
}
