mod distribution;
mod partition;
mod session_flow;
