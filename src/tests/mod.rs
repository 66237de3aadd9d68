// Test modules for all components
pub mod test_actions;
pub mod test_optimizer;
pub mod test_replay_buffer;
