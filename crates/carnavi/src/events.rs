use navring::StateKind;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Show,
    Hide,
    Progress(f64),
    SwitchState(StateKind),
    ConfigReload,
}
