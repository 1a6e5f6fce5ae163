// Classification of engine errors into automatic recovery or fatal stop

pub mod classifier;

pub use classifier::{
    fatal_message, is_behind_live_window, Classification, ClassifierState, ErrorClassifier,
    RecoveryAction,
};
