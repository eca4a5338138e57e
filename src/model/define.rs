// 型エイリアス
pub type Seat = usize; // 座席
pub type Type = usize; // 牌の種別部分 (萬子,筒子,索子,風牌,三元牌,花牌)
pub type Tnum = usize; // 牌の数字部分 (1~9)
pub type Index = usize; // その他Index
pub type Point = i32; // 得点

// Number
pub const SEAT: usize = 4; // 座席の数
pub const TYPE: usize = 7; // 牌の種別部分の数
pub const TNUM: usize = 10; // 牌の数字部分の数 (0は未使用)
pub const TILE: usize = 4; // 同種の牌の数 (花牌は各1枚)
pub const NO_SEAT: Seat = SEAT; // 座席未設定

// Type Index
pub const TM: Type = 0; // Type: Characters (萬子)
pub const TP: Type = 1; // Type: Circles    (筒子)
pub const TS: Type = 2; // Type: Bamboos    (索子)
pub const TW: Type = 3; // Type: Winds      (風牌)
pub const TD: Type = 4; // Type: Dragons    (三元牌)
pub const TB: Type = 5; // Type: BlueFlower (青花)
pub const TR: Type = 6; // Type: RedFlower  (赤花)

// Tnum Index
pub const WE: Tnum = 1; // Wind:    East  (東)
pub const WS: Tnum = 2; // Wind:    South (南)
pub const WW: Tnum = 3; // Wind:    West  (西)
pub const WN: Tnum = 4; // Wind:    North (北)
pub const DW: Tnum = 1; // Doragon: White (白)
pub const DG: Tnum = 2; // Doragon: Green (發)
pub const DR: Tnum = 3; // Doragon: Red   (中)

// sort key = (Type + 1) * 100 + Tnum
// これより小さいsort keyの牌は数牌
pub const HONOR_THRESHOLD: usize = 400;

// 牌種ごとの数字の最大値
pub const MAX_TNUM: [Tnum; TYPE] = [9, 9, 9, WN, DR, 4, 4];

// 牌種の表記 (m1, p9, w3, d1, b2, ...)
pub const TYPE_SYMBOLS: [char; TYPE] = ['m', 'p', 's', 'w', 'd', 'b', 'r'];
