mod quiz_vm;

pub use quiz_vm::{
    CardVm, LeadModalVm, MatchVm, OptionVm, QuestionVm, QuizVm, ResultVm, StageVm, quiz_vm,
};
