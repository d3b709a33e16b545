
use crate::branch::*;
use crate::error::*;
use crate::predictor::Predictor;

/// A simple predictor with no state: always predict 'taken'.
pub struct TakenPredictor;
impl Predictor for TakenPredictor {
    fn name(&self) -> &'static str { "always-taken" }
    fn predict(&mut self, _: &BranchInstruction) -> Outcome { Outcome::T }
    fn update(&mut self, _: &BranchInstruction, _: Outcome) -> Result<()> {
        Ok(())
    }
}

/// A simple predictor with no state: always predict 'not-taken'.
pub struct NotTakenPredictor;
impl Predictor for NotTakenPredictor {
    fn name(&self) -> &'static str { "always-not-taken" }
    fn predict(&mut self, _: &BranchInstruction) -> Outcome { Outcome::N }
    fn update(&mut self, _: &BranchInstruction, _: Outcome) -> Result<()> {
        Ok(())
    }
}

/// A simple predictor with no state: predict 'taken' for backward branches
/// (likely loops) and 'not-taken' for forward branches.
pub struct BackwardTakenPredictor;
impl Predictor for BackwardTakenPredictor {
    fn name(&self) -> &'static str { "btfnt" }
    fn predict(&mut self, inst: &BranchInstruction) -> Outcome {
        Outcome::from(inst.is_backward())
    }
    fn update(&mut self, _: &BranchInstruction, _: Outcome) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn insts() -> Vec<BranchInstruction> {
        vec![
            BranchInstruction::new(0x100, "beq", 0x80),
            BranchInstruction::new(0x100, "bne", 0x100),
            BranchInstruction::new(0x100, "j", 0x4000),
            BranchInstruction::new(0, "jal", 0x1fff_fffc),
        ]
    }

    #[test]
    fn constant_predictions() {
        let mut t = TakenPredictor;
        let mut n = NotTakenPredictor;
        for (i, inst) in insts().iter().enumerate() {
            let outcome = Outcome::from(i % 2 == 0);
            assert_eq!(t.predict(inst), Outcome::T);
            assert_eq!(n.predict(inst), Outcome::N);
            t.update(inst, outcome).unwrap();
            n.update(inst, outcome).unwrap();
            assert_eq!(t.predict(inst), Outcome::T);
            assert_eq!(n.predict(inst), Outcome::N);
        }
    }

    #[test]
    fn backward_taken() {
        let mut p = BackwardTakenPredictor;
        let res: Vec<Outcome> = insts().iter().map(|i| p.predict(i)).collect();
        assert_eq!(res, vec![Outcome::T, Outcome::T, Outcome::N, Outcome::N]);
    }
}
