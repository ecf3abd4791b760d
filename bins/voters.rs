use common::ServiceKind;

fn main() -> std::process::ExitCode {
    server::bootstrap::run_service(ServiceKind::Voters)
}
