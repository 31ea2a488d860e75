use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    // The search box swallows everything but its own editing keys.
    if guard.state.table.searching {
        match (key_event.code, key_event.modifiers) {
            (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            (KeyCode::Enter | KeyCode::Esc, _) => guard.end_search(),
            (KeyCode::Backspace, _) => guard.search_pop(),
            (Char(c), _) => guard.search_push(c),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Players),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Leaders),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Player),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),
        (_, KeyCode::Esc, _) => guard.go_back(),

        // Players table
        (MenuItem::Players, Char('j') | KeyCode::Down, _) => guard.table_row_down(),
        (MenuItem::Players, Char('k') | KeyCode::Up, _) => guard.table_row_up(),
        (MenuItem::Players, Char('l') | KeyCode::Right, _) => guard.table_column_right(),
        (MenuItem::Players, Char('h') | KeyCode::Left, _) => guard.table_column_left(),
        (MenuItem::Players, Char('s'), _) => guard.table_sort(),
        (MenuItem::Players, Char('o'), _) => guard.table_toggle_order(),
        (MenuItem::Players, Char('n') | KeyCode::PageDown, _) => guard.table_next_page(),
        (MenuItem::Players, Char('p') | KeyCode::PageUp, _) => guard.table_prev_page(),
        (MenuItem::Players, Char('/'), _) => guard.begin_search(),
        (MenuItem::Players, Char('P'), _) => guard.table_cycle_position(),
        (MenuItem::Players, Char('t'), _) => guard.table_cycle_team(),
        (MenuItem::Players, Char('x'), _) => guard.table_clear_filters(),
        (MenuItem::Players, KeyCode::Enter, _) => guard.open_selected_player(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),
        (_, Char('r'), _) => {
            guard.on_reload_requested();
            drop(guard);
            let _ = network_requests.send(NetworkRequest::LoadStats).await;
            let _ = network_requests.send(NetworkRequest::LoadRoster).await;
        }

        _ => {}
    }
}
