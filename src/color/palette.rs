use super::{Rgb, rgb7};

pub const OFF: Rgb = rgb7(0, 0, 0);
pub const BLACK: Rgb = OFF;

// Watch out, full white draws the most current per LED
pub const WHITE: Rgb = rgb7(127, 127, 127);
pub const GOLD: Rgb = rgb7(90, 40, 8);
pub const SILVER: Rgb = rgb7(15, 30, 60);
pub const YELLOW: Rgb = rgb7(90, 70, 0);
pub const ORANGE: Rgb = rgb7(60, 20, 0);
pub const RED: Rgb = rgb7(127, 0, 0);
pub const GREEN: Rgb = rgb7(0, 127, 0);
pub const BLUE: Rgb = rgb7(0, 0, 127);
pub const PURPLE: Rgb = rgb7(40, 0, 40);

// Whitened variants
pub const GOLD_WHITE: Rgb = rgb7(110, 70, 30);
pub const SILVER_WHITE: Rgb = rgb7(20, 45, 90);
pub const YELLOW_WHITE: Rgb = rgb7(127, 100, 15);
pub const ORANGE_WHITE: Rgb = rgb7(80, 35, 5);
pub const RED_WHITE: Rgb = rgb7(100, 3, 5);
pub const GREEN_WHITE: Rgb = rgb7(20, 127, 20);
pub const BLUE_WHITE: Rgb = rgb7(10, 20, 127);
pub const PURPLE_WHITE: Rgb = rgb7(40, 8, 40);

pub const WHITE_DIM: Rgb = rgb7(8, 15, 15);
pub const SILVER_DIM: Rgb = rgb7(8, 15, 24);
pub const GOLD_DIM: Rgb = rgb7(8, 4, 1);
pub const YELLOW_DIM: Rgb = rgb7(20, 15, 0);
pub const ORANGE_DIM: Rgb = rgb7(15, 3, 0);
pub const RED_DIM: Rgb = rgb7(32, 0, 0);
pub const GREEN_DIM: Rgb = rgb7(0, 6, 0);
pub const BLUE_DIM: Rgb = rgb7(0, 0, 24);
pub const PURPLE_DIM: Rgb = rgb7(10, 0, 10);

pub const WHITE_VERY_DIM: Rgb = rgb7(1, 2, 2);
pub const SILVER_VERY_DIM: Rgb = rgb7(1, 2, 4);
pub const GOLD_VERY_DIM: Rgb = rgb7(4, 2, 1);
pub const YELLOW_VERY_DIM: Rgb = rgb7(4, 3, 0);
pub const ORANGE_VERY_DIM: Rgb = rgb7(4, 1, 0);
pub const RED_VERY_DIM: Rgb = rgb7(1, 0, 0);
pub const GREEN_VERY_DIM: Rgb = rgb7(0, 1, 0);
pub const BLUE_VERY_DIM: Rgb = rgb7(0, 0, 1);
pub const PURPLE_VERY_DIM: Rgb = rgb7(1, 0, 1);
