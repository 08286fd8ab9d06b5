/*!
Input handling.

The keymap translates KeyEvent to high-level Actions for the App to handle.
See: `input::keymap` for the Action enum and mapping.
*/

pub mod keymap;
