//! Groups modelled on real tutorial pages, driven only through the prelude.

use tabsync::prelude::*;

#[test]
fn code_block_groups_share_language_choice_across_page() {
    let session = PageSession::new();
    let config = TabGroupConfig::new(MountStrategy::KeepMounted).group_id("CodeBlocks");
    let snippets = |net: &'static str, node: &'static str| {
        vec![
            Tab::new("NET6", net).with_label(".NET 6").default(true),
            Tab::new("NodeJS", node).with_label("NodeJS"),
        ]
    };

    let mut auth = TabGroup::in_session(snippets("auth.cs", "auth.js"), config.clone(), &session)
        .expect("valid group");
    let upload = TabGroup::in_session(snippets("upload.cs", "upload.js"), config, &session)
        .expect("valid group");

    assert_eq!(*upload.active_pane().content, "upload.cs");
    auth.select("NodeJS").expect("known value");
    assert_eq!(*upload.active_pane().content, "upload.js");
    assert_eq!(upload.render_bar(), " .NET 6  [NodeJS]");
}

#[test]
fn keyboard_only_user_switches_environment() {
    let session = PageSession::new();
    let config = TabGroupConfig::new(MountStrategy::ActiveOnly).group_id("development-environment");
    let mut group = TabGroup::in_session(
        vec![
            Tab::new("nodejs-vscode", ()).with_label("Node.js & VSCode"),
            Tab::new("dotnet-vscode", ()).with_label(".NET & VSCode"),
            Tab::new("dotnet-vs2022", ()).with_label(".NET & VS2022"),
        ],
        config,
        &session,
    )
    .expect("valid group");

    group.focus("nodejs-vscode").expect("known value");
    for code in [KeyCode::Left, KeyCode::Enter] {
        assert!(group.handle_key(&KeyEvent::new(code)));
    }
    assert_eq!(group.selected_value(), "dotnet-vs2022");
    assert_eq!(
        session.selections().get("development-environment").as_deref(),
        Some("dotnet-vs2022")
    );
    let visible: Vec<_> = group
        .panes()
        .into_iter()
        .filter(|p| p.visibility == PaneVisibility::Visible)
        .map(|p| p.value)
        .collect();
    assert_eq!(visible, vec!["dotnet-vs2022"]);
}
