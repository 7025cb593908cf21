//! Built-in default bindings
//!
//! The stock table installed at startup and by the keydefaults directive.
//! User configuration layers on top of these via bind files; keyreload
//! replays them before the user file unless a filename was given.

use tracing::{debug, warn};

use crate::engine::KeyBindings;

/// Default (key, action) pairs, bound in order
const DEFAULT_BINDINGS: &[(&str, &str)] = &[
    ("esc", "quitmessage"),
    ("Shift+esc", "quitmenu"),
    ("Ctrl+Shift+esc", "quitforce"),
    ("Alt+Shift+esc", "reloadforce"),
    ("Any+pause", "pause"),
    ("c", "controlunit"),
    ("Any+h", "sharedialog"),
    ("Any+i", "gameinfo"),
    ("backspace", "mousestate"),
    ("Shift+backspace", "togglecammode"),
    ("Ctrl+backspace", "togglecammode"),
    ("Any+tab", "toggleoverview"),
    ("Any+enter", "chat"),
    ("Alt+ctrl+a,Alt+ctrl+a", "chatswitchally"),
    ("Alt+ctrl+s,Alt+ctrl+s", "chatswitchspec"),
    ("Ctrl+v", "pastetext"),
    ("Alt+insert", "speedup"),
    ("Alt+delete", "slowdown"),
    ("Alt+=", "speedup"),
    ("Alt++", "speedup"),
    ("Alt+-", "slowdown"),
    ("Alt+numpad+", "speedup"),
    ("Alt+numpad-", "slowdown"),
    (",", "prevmenu"),
    (".", "nextmenu"),
    ("Shift+,", "decguiopacity"),
    ("Shift+.", "incguiopacity"),
    ("1", "specteam 0"),
    ("2", "specteam 1"),
    ("3", "specteam 2"),
    ("4", "specteam 3"),
    ("5", "specteam 4"),
    ("6", "specteam 5"),
    ("7", "specteam 6"),
    ("8", "specteam 7"),
    ("9", "specteam 8"),
    ("0", "specteam 9"),
    ("Any+0", "group0"),
    ("Any+1", "group1"),
    ("Any+2", "group2"),
    ("Any+3", "group3"),
    ("Any+4", "group4"),
    ("Any+5", "group5"),
    ("Any+6", "group6"),
    ("Any+7", "group7"),
    ("Any+8", "group8"),
    ("Any+9", "group9"),
    ("[", "buildfacing inc"),
    ("Shift+[", "buildfacing inc"),
    ("]", "buildfacing dec"),
    ("Shift+]", "buildfacing dec"),
    ("Any+z", "buildspacing inc"),
    ("Any+x", "buildspacing dec"),
    ("a", "attack"),
    ("Shift+a", "attack"),
    ("Alt+a", "areaattack"),
    ("Alt+Shift+a", "areaattack"),
    ("d", "manualfire"),
    ("Shift+d", "manualfire"),
    ("Ctrl+d", "selfd"),
    ("Ctrl+Shift+d", "selfd queued"),
    ("e", "reclaim"),
    ("Shift+e", "reclaim"),
    ("f", "fight"),
    ("Shift+f", "fight"),
    ("g", "guard"),
    ("Shift+g", "guard"),
    ("m", "move"),
    ("Shift+m", "move"),
    ("p", "patrol"),
    ("Shift+p", "patrol"),
    ("q", "groupselect"),
    ("q", "groupadd"),
    ("Shift+q", "groupclear"),
    ("r", "repair"),
    ("Shift+r", "repair"),
    ("s", "stop"),
    ("Shift+s", "stop"),
    ("w", "wait"),
    ("Shift+w", "wait queued"),
    ("x", "onoff"),
    ("Shift+x", "onoff"),
    ("Ctrl+t", "trackmode"),
    ("Any+t", "track"),
    ("Ctrl+f1", "viewfps"),
    ("Ctrl+f2", "viewta"),
    ("Ctrl+f3", "viewspring"),
    ("Ctrl+f4", "viewrot"),
    ("Ctrl+f5", "viewfree"),
    ("Any+f1", "ShowElevation"),
    ("Any+f2", "ShowPathTraversability"),
    ("Any+f3", "LastMsgPos"),
    ("Any+f4", "ShowMetalMap"),
    ("Any+f5", "HideInterface"),
    ("Any+f6", "MuteSound"),
    ("Ctrl+Shift+f8", "savegame"),
    ("Any+f11", "screenshot"),
    ("Any+f12", "screenshot"),
    ("Alt+enter", "fullscreen"),
    ("Any+`,Any+`", "drawlabel"),
    ("Any+\\,Any+\\", "drawlabel"),
    ("Any+~,Any+~", "drawlabel"),
    ("Any+§,Any+§", "drawlabel"),
    ("Any+^,Any+^", "drawlabel"),
    ("Any+`", "drawinmap"),
    ("Any+\\", "drawinmap"),
    ("Any+~", "drawinmap"),
    ("Any+§", "drawinmap"),
    ("Any+^", "drawinmap"),
    ("Any+up", "moveforward"),
    ("Any+down", "moveback"),
    ("Any+right", "moveright"),
    ("Any+left", "moveleft"),
    ("Any+pageup", "moveup"),
    ("Any+pagedown", "movedown"),
    ("Any+ctrl", "moveslow"),
    ("Any+shift", "movefast"),
    ("Any+ctrl", "movetilt"),
    ("Any+alt", "movereset"),
    ("Any+alt", "moverotate"),
    ("Ctrl+a", "select AllMap++_ClearSelection_SelectAll+"),
    ("Ctrl+b", "select AllMap+_Builder_Idle+_ClearSelection_SelectOne+"),
    ("Ctrl+z", "select AllMap+_InPrevSel+_ClearSelection_SelectAll+"),
];

impl KeyBindings {
    /// Install the stock bindings and the default fake meta key
    ///
    /// The hotkey index is rebuilt once at the end of the batch, not per
    /// binding.
    pub fn load_defaults(&mut self) {
        let prev_build = self.build_hotkeys;
        self.build_hotkeys = false;

        if self.debug_enabled {
            debug!("load_defaults");
        }

        let _ = self.set_fake_meta_key("space");

        for (key, action) in DEFAULT_BINDINGS {
            if let Err(err) = self.bind(key, action) {
                warn!("default binding {} -> {}: {}", key, action, err);
            }
        }

        self.build_hotkeys = prev_build;
        self.maybe_rebuild_hotkeys();
    }
}
