//! Detection rule tables. Each entry is `(pattern, label)`; patterns are matched
//! case-insensitively and every matching rule contributes its label.

pub type RuleTable = &'static [(&'static str, &'static str)];

pub const CUISINE: RuleTable = &[
    (r"/indonesian\b", "indonesian"),
    (r"/thailand\b", "thai"),
    (r"/china\b", "chinese"),
    (r"/filipijnen\b", "filipino"),
    (r"/korea\b", "korean"),
    (r"/vietnam\b", "vietnamese"),
];

pub const DISH_TYPE: RuleTable = &[
    (r"\bhoofdgerecht\b", "hoofdgerecht"),
    (r"\bbijgerecht\b", "bijgerecht"),
    (r"\bvoorgerecht\b", "voorgerecht"),
    (r"\bnagerecht\b", "nagerecht"),
    (r"\bsnack\b", "snack"),
    (r"\batjar\b", "bijgerecht"),
    (r"\bsambal\b", "sambal"),
    (r"\bsop\b", "soep"),
    (r"\bsoto\b", "soep"),
    (r"\bsate\b", "sate"),
    (r"\bsaté\b", "sate"),
    (r"\bnasi\b", "rijstgerecht"),
    (r"\bmie\b", "noedelgerecht"),
    (r"\bbami\b", "noedelgerecht"),
    (r"\brendang\b", "stoofgerecht"),
    (r"\bsmoor\b", "stoofgerecht"),
    (r"\bgulai\b", "curry"),
    (r"\bkari\b", "curry"),
];

pub const MAIN_INGREDIENT: RuleTable = &[
    (r"\b(rundvlees|daging|sapi)\b", "daging-rundvlees"),
    (r"\b(varkensvlees|babi|spek)\b", "varkensvlees"),
    (r"\b(kip|ayam|bebek|eend)\b", "kip-ayam"),
    (r"\b(vis|ikan|mosselen|garnalen|udang|cumi|inktvis)\b", "vis-vis-schelpdieren"),
    (r"\b(tahu|tempe|tahoe|tempeh)\b", "vegetarisch-vega"),
    (r"\b(sayur|groente)\b", "vegetarisch-vega"),
    (r"\b(ei|telur)\b", "ei"),
];

pub const COOKING_METHOD: RuleTable = &[
    (r"\bbakken\b", "bakken"),
    (r"\bbraden\b", "braden"),
    (r"\bfrituren\b", "frituren"),
    (r"\bgrillen\b", "grillen"),
    (r"\broosteren\b", "roosteren"),
    (r"\bstoven\b", "stoven"),
    (r"\bkoken\b", "koken"),
    (r"\bstomen\b", "stomen"),
    (r"\bwokken\b", "wokken"),
    (r"\broerbakken\b", "wokken"),
];

pub const REGION: RuleTable = &[
    (r"\bjava\b", "Java"),
    (r"\bjavaans\b", "Java"),
    (r"\bsumatra\b", "Sumatra"),
    (r"\bbali\b", "Bali"),
    (r"\bbalinees\b", "Bali"),
    (r"\bsulawesi\b", "Sulawesi"),
    (r"\bcelebes\b", "Sulawesi"),
    (r"\bkalimantan\b", "Kalimantan"),
    (r"\bborneo\b", "Kalimantan"),
    (r"\bpadang\b", "Padang"),
    (r"\bbetawi\b", "Jakarta"),
    (r"\bjakarta\b", "Jakarta"),
    (r"\bsunda\b", "Sunda"),
    (r"\baceh\b", "Aceh"),
    (r"\bmanado\b", "Manado"),
    (r"\bambon\b", "Ambon"),
    (r"\bmolukken\b", "Ambon"),
];
