use ratatui::style::Color;

// Color Theme Constants
pub const COLOR_HEADER_BG: Color = Color::Rgb(222, 222, 222);     // Light gray background
pub const COLOR_HEADER_FG: Color = Color::Rgb(0, 0, 0);           // Dark text
pub const COLOR_PATH: Color = Color::Rgb(0, 255, 255);            // Bright cyan
pub const COLOR_NAV_ENABLED: Color = Color::Rgb(255, 255, 255);   // White arrows
pub const COLOR_NAV_DISABLED: Color = Color::Rgb(90, 90, 90);     // Dim arrows
pub const COLOR_COLUMN_HEADER: Color = Color::Rgb(255, 220, 0);   // Vibrant yellow
pub const COLOR_SIZE: Color = Color::Rgb(78, 154, 6);             // Green for sizes
pub const COLOR_DATE: Color = Color::Rgb(160, 160, 160);          // Gray for dates
pub const COLOR_DIRECTORY: Color = Color::Rgb(0, 220, 255);       // Bright cyan for dirs
pub const COLOR_BUNDLE: Color = Color::Rgb(220, 120, 255);        // Violet for bundles
pub const COLOR_FILE: Color = Color::Rgb(220, 220, 220);          // Light gray for files
pub const COLOR_HELP_TITLE: Color = Color::Rgb(0, 255, 255);      // Bright cyan
pub const COLOR_HELP_HEADER: Color = Color::Rgb(255, 220, 0);     // Vibrant yellow
pub const COLOR_HELP_HINT: Color = Color::Rgb(128, 128, 128);     // Gray
pub const COLOR_ALERT_BORDER: Color = Color::Rgb(255, 80, 80);    // Red frame for errors
pub const COLOR_HIGHLIGHT_BG: Color = Color::Rgb(255, 255, 255);  // White background when selected
pub const COLOR_HIGHLIGHT_FG: Color = Color::Rgb(40, 40, 40);     // Dark gray text when selected (matches terminal bg)
