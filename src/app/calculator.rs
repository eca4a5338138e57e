use crate::control::common::*;
use crate::hand::*;
use crate::model::*;
use crate::util::misc::*;

// [CalculatorApp]
// 1つの手牌表記を解析して和了形と点数を表示
//   例: "m111222333w111d11 /p777 seat=1 prevailing=1 flowers=b1r1 tsumo"
// 最初の要素が手牌, '/'から始まる要素が鳴き(末尾に'*'で暗槓), それ以外は key=value
#[derive(Debug)]
pub struct CalculatorApp {
    exp: String,
    detail: bool,
}

impl CalculatorApp {
    pub fn new(exp: &str, detail: bool) -> Self {
        Self {
            exp: exp.to_string(),
            detail,
        }
    }

    pub fn run(&self) -> Res {
        println!("> {}", self.exp);
        let calculator = Calculator::parse(&self.exp)?;
        if self.detail {
            println!("{:?}", calculator);
        }
        calculator.run(self.detail);
        Ok(())
    }
}

#[derive(Debug)]
struct Calculator {
    hand: TileTable,
    melds: Vec<Meld>,
    cond: WinConditions,
}

impl Calculator {
    fn parse(input: &str) -> Res<Self> {
        let mut calc = Self {
            hand: TileTable::default(),
            melds: vec![],
            cond: WinConditions {
                seat_wind: WE,
                prevailing_wind: WE,
                flower_number: WE,
                ..Default::default()
            },
        };

        let input = input.split('#').next().unwrap_or(""); // コメント削除
        let mut exp_hand = None;
        let mut exp_melds = vec![];
        for item in input.split_whitespace() {
            if let Some((key, value)) = item.split_once('=') {
                calc.parse_key_value(key, value)?;
                continue;
            }
            if item == "tsumo" {
                calc.cond.is_self_drawn = true;
                continue;
            }

            // "m123/p777" のように手牌と鳴きが続けて書かれていてもよい
            let mut parts = item.split('/');
            if let Some(h) = parts.next() {
                if !h.is_empty() {
                    if exp_hand.is_some() {
                        Err(format!("multiple hand expression: {}", item))?;
                    }
                    exp_hand = Some(h.to_string());
                }
            }
            exp_melds.extend(parts.filter(|m| !m.is_empty()).map(|m| m.to_string()));
        }

        let exp_hand = exp_hand.ok_or("hand expression not found")?;
        let tiles = tiles_from_string(&exp_hand)?;
        if tiles.iter().any(|t| t.is_flower()) {
            Err(format!("flower in hand: {}", exp_hand))?;
        }
        calc.hand = tiles_to_tile_table(&tiles);

        for m in &exp_melds {
            let is_concealed = m.ends_with('*');
            let meld = meld_from_string(m.trim_end_matches('*'), 0, is_concealed)?;
            calc.melds.push(meld);
        }

        let n = tiles.len() + 3 * calc.melds.len();
        if n != 14 {
            Err(format!("hand must have 14 tiles excluding quad extras: {}", n))?;
        }

        calc.cond.flower_number = calc.cond.seat_wind;
        calc.cond.n_self_quads = vec_count(
            &calc.melds.iter().map(|m| m.meld_type).collect::<Vec<_>>(),
            &MeldType::Ankan,
        );
        calc.cond.n_claimed_melds = calc.melds.len() - calc.cond.n_self_quads;
        Ok(calc)
    }

    fn parse_key_value(&mut self, key: &str, value: &str) -> Res {
        let wind = |v: &str| -> Res<Tnum> {
            let mut cs = v.chars();
            match (cs.next(), cs.next()) {
                (Some(c), None) => Ok(wind_from_char(c)?),
                _ => Err(format!("invalid wind: {}", v).into()),
            }
        };
        match key {
            "seat" => self.cond.seat_wind = wind(value)?,
            "prevailing" => self.cond.prevailing_wind = wind(value)?,
            "flowers" => {
                let flowers = tiles_from_string(value)?;
                if let Some(t) = flowers.iter().find(|t| !t.is_flower()) {
                    Err(format!("not a flower: {}", t))?;
                }
                self.cond.flowers = flowers;
            }
            _ => Err(format!("unknown item: {}={}", key, value))?,
        }
        Ok(())
    }

    fn run(&self, detail: bool) -> Option<ScoreContext> {
        let res = analyze(&self.hand, None, &self.melds);
        if detail {
            println!("{:?}", res);
        }
        let Some(d) = res.decomposition() else {
            println!("not win hand");
            return None;
        };

        println!("shape: {:?}, single_suit: {}", d.shape, res.is_single_suit);
        for d in &res.decompositions {
            println!("  {}", vec_to_string(&d.sets));
        }
        let sc = score_hand(&res, &self.cond)?;
        println!("score: {}", sc);
        if sc.points <= 0 {
            println!("non-positive score is not a valid win");
        }
        Some(sc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(exp: &str) -> Option<ScoreContext> {
        Calculator::parse(exp).unwrap().run(false)
    }

    #[test]
    fn test_calculator_basic() {
        let sc = calc("m123p456s789m555p99").unwrap();
        assert_eq!(sc.points, 1);
        assert!(calc("m123p456s789m555p19").is_none());
    }

    #[test]
    fn test_calculator_context() {
        // 南家が自分の花牌を2枚
        let sc = calc("m123p456s789m555p99 seat=2 prevailing=1 flowers=b2r2").unwrap();
        assert_eq!(sc.points, 2);

        // 他家の花牌のみ
        let sc = calc("m123p456s789m555p99 seat=S flowers=b1").unwrap();
        assert_eq!(sc.points, 0);
    }

    #[test]
    fn test_calculator_melds() {
        let c = Calculator::parse("m111333555w22/w3333* tsumo").unwrap();
        assert_eq!(c.cond.n_self_quads, 1);
        assert_eq!(c.cond.n_claimed_melds, 0);
        assert!(c.cond.is_self_drawn);

        let c = Calculator::parse("m111333555w22 /w333 seat=3").unwrap();
        assert_eq!(c.cond.n_claimed_melds, 1);
        let sc = c.run(false).unwrap();
        assert_eq!(sc.points, 6);
    }

    #[test]
    fn test_calculator_errors() {
        assert!(Calculator::parse("m123").is_err());
        assert!(Calculator::parse("m123p456s789m555p99 seat=5").is_err());
        assert!(Calculator::parse("m123p456s789m555p99 flowers=m1").is_err());
        assert!(Calculator::parse("m123p456s789m555p99 foo=1").is_err());
        assert!(Calculator::parse("m123p456s789m555b1").is_err());
    }
}
