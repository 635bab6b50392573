use serde::Serialize;
use std::collections::HashSet;

use super::axis::{Axis, Letter};
use super::code::InvestorCode;
use super::questions::QuestionId;

/// Pre-authored result content for one investor type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeRecord {
    pub code: InvestorCode,
    pub name: &'static str,
    pub short_label: &'static str,
    /// Long-form text; lines wrapped in `**` are section headings.
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideal_strategy: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_message: Option<&'static str>,
    pub best_matches: &'static [InvestorCode],
    pub good_matches: &'static [InvestorCode],
    pub challenge_matches: &'static [InvestorCode],
}

impl TypeRecord {
    /// Every code this record links to, in best/good/challenge order.
    pub fn referenced_codes(&self) -> impl Iterator<Item = InvestorCode> + '_ {
        self.best_matches
            .iter()
            .chain(self.good_matches)
            .chain(self.challenge_matches)
            .copied()
    }
}

/// Read-only mapping from code to [`TypeRecord`].
#[derive(Debug, Clone, Copy)]
pub struct TypeCatalog<'a> {
    records: &'a [TypeRecord],
}

impl<'a> TypeCatalog<'a> {
    pub const fn new(records: &'a [TypeRecord]) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &'a [TypeRecord] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, code: InvestorCode) -> Option<&'a TypeRecord> {
        self.records.iter().find(|record| record.code == code)
    }

    pub fn contains(&self, code: InvestorCode) -> bool {
        self.get(code).is_some()
    }

    /// Case-insensitive lookup by raw string. Unknown or malformed codes yield `None`.
    pub fn lookup(&self, raw: &str) -> Option<&'a TypeRecord> {
        InvestorCode::parse(raw)
            .ok()
            .and_then(|code| self.get(code))
    }

    /// Checks that every code has exactly one record and every match link resolves.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for record in self.records {
            if !seen.insert(record.code) {
                return Err(CatalogError::DuplicateType(record.code));
            }
        }

        if let Some(code) = InvestorCode::ALL
            .into_iter()
            .find(|code| !seen.contains(code))
        {
            return Err(CatalogError::MissingType(code));
        }

        for record in self.records {
            if let Some(target) = record.referenced_codes().find(|code| !self.contains(*code)) {
                return Err(CatalogError::DanglingMatch {
                    from: record.code,
                    to: target,
                });
            }
        }

        Ok(())
    }
}

impl TypeCatalog<'static> {
    pub fn standard() -> Self {
        Self::new(&STANDARD_TYPES)
    }
}

/// Looks up a type record in the standard catalog, ignoring case.
pub fn lookup_type(code: &str) -> Option<&'static TypeRecord> {
    TypeCatalog::standard().lookup(code)
}

/// Integrity failures in the authored question or type content.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("question id {0} is zero or duplicated")]
    InvalidQuestionId(QuestionId),
    #[error("question {0} has no weights")]
    UnweightedQuestion(QuestionId),
    #[error("question {question} on the {axis} axis weights foreign letter {letter}")]
    ForeignLetter {
        question: QuestionId,
        axis: Axis,
        letter: Letter,
    },
    #[error("question {question} has a non-positive weight for {letter}")]
    NonPositiveWeight { question: QuestionId, letter: Letter },
    #[error("{axis} axis has {count} questions, expected an even share")]
    UnbalancedAxis { axis: Axis, count: usize },
    #[error("type {0} appears more than once")]
    DuplicateType(InvestorCode),
    #[error("type {0} has no record")]
    MissingType(InvestorCode),
    #[error("type {from} links to {to}, which has no record")]
    DanglingMatch {
        from: InvestorCode,
        to: InvestorCode,
    },
}

static STANDARD_TYPES: [TypeRecord; 16] = [
    TypeRecord {
        code: InvestorCode::RATD,
        name: "チャートスナイパー",
        short_label: "瞬発力の天才トレーダー",
        description: "**基本性格**\n\
            あなたは\"瞬発力の天才\"。\n\
            データとチャートを読み解き、タイミングを見極めて利益を取りに行く。\n\
            感情ではなく数字で判断し、自分のルールに忠実。\n\
            市場の波に乗ることに喜びを感じる、アクティブな投資家です。\n\
            \n\
            **長所と短所**\n\
            分析力と決断力が高く、チャンスを逃さない。\n\
            ただし、短期売買による手数料や税金、そして精神的な疲労には注意が必要。\n\
            過信すると大きな損失を出すリスクも。\n\
            \n\
            **理想の投資方針**\n\
            成長株＋テクニカル分析＋損切りルール徹底。\n\
            「素早く動き、素早く判断する」があなたのモットー",
        ideal_strategy: Some("成長株＋テクニカル分析＋損切りルール徹底"),
        cta_message: Some("リアルタイムの市場分析で、さらに投資判断を磨きませんか？woodstock.clubで最新の投資情報とコミュニティを体験しましょう。"),
        best_matches: &[InvestorCode::RATV, InvestorCode::SALD],
        good_matches: &[InvestorCode::SALV],
        challenge_matches: &[InvestorCode::RCLV],
    },
    TypeRecord {
        code: InvestorCode::RATV,
        name: "トレンドハンター",
        short_label: "嗅覚の鋭い開拓者",
        description: "**基本性格**\n\
            あなたは\"嗅覚の鋭い開拓者\"。\n\
            データだけでなく、直感や物語性を重視して投資先を選ぶ。\n\
            「これは来る！」と感じたテーマに素早く飛び込むタイプ。\n\
            市場の未来を読み、先回りすることにワクワクする冒険家です。\n\
            \n\
            **長所と短所**\n\
            感性が鋭く、新しいトレンドをいち早くキャッチできる。\n\
            ただし、感情に流されやすく、バブルに巻き込まれるリスクも。\n\
            根拠が薄いまま動くと、痛手を負うことも。\n\
            \n\
            **理想の投資方針**\n\
            テーマ株＋新興市場＋ポートフォリオ分散。\n\
            「未来を信じて、早めに動く」があなたのモットー",
        ideal_strategy: Some("テーマ株＋新興市場＋ポートフォリオ分散"),
        cta_message: Some("次のトレンドを見逃さない。woodstock.clubで最新の投資テーマと成長企業の情報をいち早くチェックしましょう。"),
        best_matches: &[InvestorCode::RATD],
        good_matches: &[InvestorCode::RCLV],
        challenge_matches: &[InvestorCode::SCLV],
    },
    TypeRecord {
        code: InvestorCode::RALD,
        name: "成長コレクター",
        short_label: "戦略的な資産家",
        description: "**基本性格**\n\
            あなたは\"戦略的な資産家\"。\n\
            長期的な視野を持ちながら、データを基に成長性の高い企業を選別。\n\
            じっくり育てることを楽しみつつ、必要に応じて柔軟に動ける。\n\
            時間を味方につけた、賢い投資家です。\n\
            \n\
            **長所と短所**\n\
            冷静な分析力と長期視点を併せ持つバランス型。\n\
            ただし、短期の誘惑に負けると戦略がブレることも。\n\
            リスクを取りすぎて、調整局面で焦る可能性もある。\n\
            \n\
            **理想の投資方針**\n\
            成長株＋長期保有＋定期的なリバランス。\n\
            「データで選び、時間で育てる」があなたのモットー",
        ideal_strategy: Some("成長株＋長期保有＋定期的なリバランス"),
        cta_message: Some("長期投資を成功させるための最新の市場分析とポートフォリオ管理ツールを、woodstock.clubで体験してみませんか？"),
        best_matches: &[InvestorCode::RCLD, InvestorCode::SALD],
        good_matches: &[InvestorCode::RATD],
        challenge_matches: &[InvestorCode::RATV],
    },
    TypeRecord {
        code: InvestorCode::RALV,
        name: "ビジョンドリーマー",
        short_label: "未来を描く夢想家",
        description: "**基本性格**\n\
            あなたは\"未来を描く夢想家\"。\n\
            企業のビジョンや社会的意義に共感して投資し、長期で応援する。\n\
            数字だけでなく、「この会社と一緒に成長したい」という思いが強い。\n\
            理念とリターンの両立を目指す、理想主義の投資家です。\n\
            \n\
            **長所と短所**\n\
            ブレない軸を持ち、長期で成果を出せるポテンシャルが高い。\n\
            ただし、思い入れが強すぎて、冷静な判断を欠くこともある。\n\
            財務状況を軽視すると、思わぬ損失を被るリスクも。\n\
            \n\
            **理想の投資方針**\n\
            ESG投資＋成長期待株＋長期ホールド。\n\
            「共感した企業と共に育つ」があなたのモットー",
        ideal_strategy: Some("ESG投資＋成長期待株＋長期ホールド"),
        cta_message: Some("理念と利益を両立させる投資を。woodstock.clubで社会的価値の高い企業の最新情報を手に入れましょう。"),
        best_matches: &[InvestorCode::RCLD],
        good_matches: &[InvestorCode::RATD, InvestorCode::SALD],
        challenge_matches: &[InvestorCode::RCLV],
    },
    TypeRecord {
        code: InvestorCode::RCTD,
        name: "情報ハンター",
        short_label: "情報の目利きトレーダー",
        description: "**基本性格**\n\
            あなたは\"情報の目利き\"。\n\
            SNSやニュース、コミュニティから情報を集め、データで検証して動く。\n\
            みんなの意見を聞きつつ、最終判断は数字で下す。\n\
            情報収集力と分析力を兼ね備えた、現代的な投資家です。\n\
            \n\
            **長所と短所**\n\
            多角的な視点を持ち、情報感度が高い。\n\
            ただし、情報過多で判断が遅れることも。\n\
            ノイズに惑わされ、振り回されるリスクもある。\n\
            \n\
            **理想の投資方針**\n\
            話題株＋テクニカル分析＋情報ソース多様化。\n\
            「情報を集め、数字で決める」があなたのモットー",
        ideal_strategy: Some("話題株＋テクニカル分析＋情報ソース多様化"),
        cta_message: Some("情報が武器。woodstock.clubの投資家コミュニティで、信頼できる情報と分析を手に入れましょう。"),
        best_matches: &[InvestorCode::RATD, InvestorCode::RCLD],
        good_matches: &[InvestorCode::RATV],
        challenge_matches: &[InvestorCode::SCLV],
    },
    TypeRecord {
        code: InvestorCode::RCTV,
        name: "バズライダー",
        short_label: "波乗り名人トレーダー",
        description: "**基本性格**\n\
            あなたは\"波乗り名人\"。\n\
            SNSやコミュニティのトレンドを敏感に察知し、共感した銘柄に素早く投資。\n\
            みんなが盛り上がっているものに乗ることで、勢いを味方につける。\n\
            社交性と行動力が武器の、モダンな投資家です。\n\
            \n\
            **長所と短所**\n\
            タイミングが良く、話題株で利益を得やすい。\n\
            ただし、バブルに巻き込まれやすく、暴落に弱い。\n\
            流行に乗りすぎて、本質を見失うリスクも。\n\
            \n\
            **理想の投資方針**\n\
            話題株＋短期売買＋損切り徹底。\n\
            「波に乗り、タイミングで勝つ」があなたのモットー",
        ideal_strategy: Some("話題株＋短期売買＋損切り徹底"),
        cta_message: Some("トレンドの波に乗る。woodstock.clubで今話題の投資テーマとコミュニティの生の声をチェックしましょう。"),
        best_matches: &[InvestorCode::RATD, InvestorCode::RATV],
        good_matches: &[InvestorCode::RCLV],
        challenge_matches: &[InvestorCode::SALV],
    },
    TypeRecord {
        code: InvestorCode::RCLD,
        name: "チームビルダー",
        short_label: "仲間と築く資産形成",
        description: "**基本性格**\n\
            あなたは\"チームプレイヤー\"。\n\
            投資コミュニティや仲間と情報交換しながら、データで裏付けを取る。\n\
            長期的な視点で、みんなと一緒に成長していくスタイル。\n\
            協調性と分析力を兼ね備えた、信頼される投資家です。\n\
            \n\
            **長所と短所**\n\
            多様な視点を取り入れ、リスク分散ができる。\n\
            ただし、集団心理に流されやすい面も。\n\
            自分の判断軸を失うと、成果が出にくい。\n\
            \n\
            **理想の投資方針**\n\
            優良株＋長期保有＋コミュニティ活用。\n\
            「仲間と学び、データで決める」があなたのモットー",
        ideal_strategy: Some("優良株＋長期保有＋コミュニティ活用"),
        cta_message: Some("仲間と一緒に学び成長する。woodstock.clubの投資家コミュニティで、知識と経験を共有しましょう。"),
        best_matches: &[InvestorCode::RALV, InvestorCode::RALD],
        good_matches: &[InvestorCode::RCTV],
        challenge_matches: &[InvestorCode::SALV],
    },
    TypeRecord {
        code: InvestorCode::RCLV,
        name: "共感エバンジェリスト",
        short_label: "理念の伝道師",
        description: "**基本性格**\n\
            あなたは\"理念の伝道師\"。\n\
            社会的意義や企業理念に共感し、仲間と一緒に長期で応援する。\n\
            利益だけでなく、「世界を良くしたい」という思いが投資の原動力。\n\
            情熱と理想を持った、次世代の投資家です。\n\
            \n\
            **長所と短所**\n\
            ブレない価値観と長期視点で、意義ある投資ができる。\n\
            ただし、感情的になりすぎて、財務リスクを軽視することも。\n\
            仲間の意見に引っ張られ、冷静さを失うリスクもある。\n\
            \n\
            **理想の投資方針**\n\
            ESG投資＋テーマ株＋長期ホールド。\n\
            「共感で選び、仲間と育てる」があなたのモットー",
        ideal_strategy: Some("ESG投資＋テーマ株＋長期ホールド"),
        cta_message: Some("同じ理念を持つ仲間と繋がる。woodstock.clubで社会的価値を大切にする投資家コミュニティに参加しませんか？"),
        best_matches: &[InvestorCode::RATV],
        good_matches: &[InvestorCode::SCLV],
        challenge_matches: &[InvestorCode::RATD],
    },
    TypeRecord {
        code: InvestorCode::SATD,
        name: "堅実ファイター",
        short_label: "慎重なチャレンジャー",
        description: "**基本性格**\n\
            あなたは\"慎重なチャレンジャー\"。\n\
            リスクを抑えつつ、データを見てタイミングよく動く。\n\
            損失を最小限に抑えながら、短期でも利益を狙う。\n\
            安全性と機動力を両立させた、バランス型の投資家です。\n\
            \n\
            **長所と短所**\n\
            リスク管理が徹底しており、大きな損失を避けられる。\n\
            ただし、慎重すぎてチャンスを逃すことも。\n\
            短期売買の手数料や税金負担も考慮が必要。\n\
            \n\
            **理想の投資方針**\n\
            配当株＋短期売買＋損切り徹底。\n\
            「守りながら攻める」があなたのモットー",
        ideal_strategy: Some("配当株＋短期売買＋損切り徹底"),
        cta_message: Some("リスクを抑えながらも機動的に。woodstock.clubで安定性と収益性を両立する投資情報を入手しましょう。"),
        best_matches: &[InvestorCode::SALD],
        good_matches: &[InvestorCode::RATD],
        challenge_matches: &[InvestorCode::RCTV],
    },
    TypeRecord {
        code: InvestorCode::SATV,
        name: "バランスマスター",
        short_label: "調和を極めた達人",
        description: "**基本性格**\n\
            あなたは\"バランスの達人\"。\n\
            安全性を重視しつつ、直感や共感も大切にする。\n\
            短期でも動けるけど、無理はしない。\n\
            柔軟性と慎重さを兼ね備えた、現実的な投資家です。\n\
            \n\
            **長所と短所**\n\
            適度なリスクで、心地よく投資を楽しめる。\n\
            ただし、中途半端になりやすく、大きな成果が出にくい。\n\
            優柔不断で、タイミングを逃すことも。\n\
            \n\
            **理想の投資方針**\n\
            バランス型ファンド＋少額の個別株＋現金比率確保。\n\
            「無理せず、楽しく続ける」があなたのモットー",
        ideal_strategy: Some("バランス型ファンド＋少額の個別株＋現金比率確保"),
        cta_message: Some("無理なく楽しく続ける投資を。woodstock.clubで初心者にも優しい投資コミュニティに参加しましょう。"),
        best_matches: &[InvestorCode::SALD, InvestorCode::SALV],
        good_matches: &[InvestorCode::RCLV],
        challenge_matches: &[InvestorCode::RATV],
    },
    TypeRecord {
        code: InvestorCode::SALD,
        name: "コツコツマスター",
        short_label: "堅実な資産家",
        description: "**基本性格**\n\
            あなたは\"堅実な資産家\"。\n\
            データに基づいて優良な投資先を選び、長期でコツコツ積み立てる。\n\
            焦らず、騒がず、淡々と資産を増やすタイプ。\n\
            時間と複利を味方につけた、王道の投資家です。\n\
            \n\
            **長所と短所**\n\
            リスクが低く、長期で確実に成果を出しやすい。\n\
            ただし、退屈に感じたり、短期の誘惑に負けることも。\n\
            過度な安全志向は、インフレに負けるリスクもある。\n\
            \n\
            **理想の投資方針**\n\
            インデックスファンド＋高配当株＋定期積立。\n\
            「焦らず、淡々と積み上げる」があなたのモットー",
        ideal_strategy: Some("インデックスファンド＋高配当株＋定期積立"),
        cta_message: Some("堅実な資産形成をサポート。woodstock.clubで長期投資に役立つ情報とツールを活用しませんか？"),
        best_matches: &[InvestorCode::SALV],
        good_matches: &[InvestorCode::RATD, InvestorCode::RALD],
        challenge_matches: &[InvestorCode::RCTV],
    },
    TypeRecord {
        code: InvestorCode::SALV,
        name: "ファミリーガーディアン",
        short_label: "守る強さを知る人",
        description: "**基本性格**\n\
            あなたは\"守る強さ\"を知っている。\n\
            リスクを理解しつつ、家族や将来のために動くタイプ。\n\
            浪費より貯蓄、投機より投資。\n\
            投資の目的は「増やすこと」ではなく「安心を維持すること」。\n\
            現実的な判断ができるあなたは、家庭やチームで頼られる存在です。\n\
            \n\
            **長所と短所**\n\
            バランス感覚抜群で、地に足がついている。\n\
            ただし保守的になりすぎて、チャンスを逃すことも。\n\
            過剰な\"安全志向\"は資産を眠らせるリスクでもある。\n\
            \n\
            **理想の投資方針**\n\
            高配当株＋インデックス＋現金比率20％。\n\
            「減らさず増やす」があなたのモットー",
        ideal_strategy: Some("高配当株＋インデックス＋現金比率20％"),
        cta_message: Some("家族の未来を守る投資を。woodstock.clubで安心できる資産運用の情報を手に入れましょう。"),
        best_matches: &[InvestorCode::SALD],
        good_matches: &[InvestorCode::SCLD],
        challenge_matches: &[InvestorCode::RATV, InvestorCode::RCTV],
    },
    TypeRecord {
        code: InvestorCode::SCTD,
        name: "石橋ウォッチャー",
        short_label: "確認してから動く人",
        description: "**基本性格**\n\
            あなたは\"確認してから動く人\"。\n\
            みんなの意見を聞き、データで裏付けを取ってから投資する。\n\
            慎重だけど、短期のチャンスも見逃さない。\n\
            安全性と情報感度を兼ね備えた、堅実な投資家です。\n\
            \n\
            **長所と短所**\n\
            多角的に情報を集め、リスクを最小限に抑えられる。\n\
            ただし、慎重すぎてタイミングを逃すことも。\n\
            情報収集に時間をかけすぎて、行動が遅れることもある。\n\
            \n\
            **理想の投資方針**\n\
            優良株＋短期売買＋情報収集徹底。\n\
            「確認してから動く」があなたのモットー",
        ideal_strategy: Some("優良株＋短期売買＋情報収集徹底"),
        cta_message: Some("慎重な判断をサポート。woodstock.clubで多角的な投資情報と分析データを確認しませんか？"),
        best_matches: &[InvestorCode::RATD],
        good_matches: &[InvestorCode::SCLV],
        challenge_matches: &[InvestorCode::RATV],
    },
    TypeRecord {
        code: InvestorCode::SCTV,
        name: "空気読みフォロワー",
        short_label: "空気を読む投資家",
        description: "**基本性格**\n\
            あなたは\"空気を読む投資家\"。\n\
            周りの雰囲気や共感できる企業に、慎重に投資する。\n\
            短期でも動くけど、無理はしない。\n\
            社交性と慎重さを兼ね備えた、共感型の投資家です。\n\
            \n\
            **長所と短所**\n\
            周囲の意見を参考にでき、安心感を持って投資できる。\n\
            ただし、流行に流されやすく、自分の軸を失いがち。\n\
            感情的な判断で、損失を出すリスクもある。\n\
            \n\
            **理想の投資方針**\n\
            話題株＋少額投資＋損切り徹底。\n\
            「共感しながら、慎重に動く」があなたのモットー",
        ideal_strategy: Some("話題株＋少額投資＋損切り徹底"),
        cta_message: Some("共感できる投資を探す。woodstock.clubで話題の企業情報とコミュニティの意見をチェックしましょう。"),
        best_matches: &[InvestorCode::RCLV],
        good_matches: &[InvestorCode::RCTV],
        challenge_matches: &[InvestorCode::RATD],
    },
    TypeRecord {
        code: InvestorCode::SCLD,
        name: "成長シーカー",
        short_label: "学びながら成長する人",
        description: "**基本性格**\n\
            あなたは\"学びながら成長する人\"。\n\
            投資初心者から一歩進んで、データや周りの意見を参考に長期投資。\n\
            焦らず、着実に資産形成を目指すタイプ。\n\
            謙虚さと学習意欲を持った、成長型の投資家です。\n\
            \n\
            **長所と短所**\n\
            リスクを抑えながら、着実に成果を出せる。\n\
            ただし、保守的すぎて、成長が遅いことも。\n\
            周りに依存しすぎると、自分の判断力が育たない。\n\
            \n\
            **理想の投資方針**\n\
            インデックスファンド＋少額の個別株＋学習継続。\n\
            「学びながら、着実に積み上げる」があなたのモットー",
        ideal_strategy: Some("インデックスファンド＋少額の個別株＋学習継続"),
        cta_message: Some("学びながら成長する投資を。woodstock.clubで初心者から中級者へステップアップしませんか？"),
        best_matches: &[InvestorCode::SALD, InvestorCode::SALV],
        good_matches: &[InvestorCode::SCLV],
        challenge_matches: &[InvestorCode::RCTV],
    },
    TypeRecord {
        code: InvestorCode::SCLV,
        name: "安心キーパー",
        short_label: "安心を求める仲間想い",
        description: "**基本性格**\n\
            あなたは\"安心を求める仲間想い\"。\n\
            周りの意見や企業の理念に共感し、長期で応援する。\n\
            リスクは最小限に、安心感を最優先。\n\
            慎重さと共感力を持った、優しい投資家です。\n\
            \n\
            **長所と短所**\n\
            安心感を持って投資でき、精神的な負担が少ない。\n\
            ただし、保守的すぎて、大きな成果が出にくい。\n\
            周りに流されやすく、自分の判断軸が弱いことも。\n\
            \n\
            **理想の投資方針**\n\
            インデックスファンド＋ESG投資＋現金比率30％。\n\
            「安心して、共感しながら続ける」があなたのモットー",
        ideal_strategy: Some("インデックスファンド＋ESG投資＋現金比率30％"),
        cta_message: Some("安心して続けられる投資を。woodstock.clubで同じ価値観を持つ仲間と一緒に、堅実な資産形成を始めましょう。"),
        best_matches: &[InvestorCode::SALV, InvestorCode::RCLV],
        good_matches: &[InvestorCode::SCLD],
        challenge_matches: &[InvestorCode::RATV, InvestorCode::RCTV],
    },
];
