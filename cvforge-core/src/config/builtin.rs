// Built-in rule tables. Every function here doubles as a serde default.

use super::{IndustryRule, RuleTable};
use std::collections::BTreeMap;

fn table(pairs: &[(&str, &str)]) -> RuleTable {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ===== VERBS (keyed by lemma) =====

pub fn power_verbs() -> RuleTable {
    table(&[
        ("assist", "support"),
        ("bring", "deliver"),
        ("build", "construct"),
        ("buy", "procure"),
        ("break", "restructure"),
        ("choose", "select"),
        ("come", "arrive"),
        ("cut", "reduce"),
        ("deal", "manage"),
        ("do", "execute"),
        ("draw", "design"),
        ("drive", "spearhead"),
        ("fall", "decline"),
        ("feel", "recognize"),
        ("find", "identify"),
        ("fly", "travel"),
        ("forget", "overlook"),
        ("get", "achieve"),
        ("give", "deliver"),
        ("go", "navigate"),
        ("grow", "expand"),
        ("handle", "manage"),
        ("hear", "receive"),
        ("help", "facilitate"),
        ("hit", "achieve"),
        ("hold", "maintain"),
        ("hurt", "impact"),
        ("keep", "maintain"),
        ("know", "understand"),
        ("lead", "direct"),
        ("leave", "transition"),
        ("let", "enable"),
        ("look", "analyze"),
        ("lose", "reduce"),
        ("make", "create"),
        ("meet", "exceed"),
        ("pay", "invest"),
        ("put", "implement"),
        ("read", "analyze"),
        ("ride", "utilize"),
        ("rise", "increase"),
        ("run", "manage"),
        ("say", "articulate"),
        ("see", "observe"),
        ("sell", "market"),
        ("send", "deliver"),
        ("set", "establish"),
        ("shoot", "capture"),
        ("show", "demonstrate"),
        ("shut", "close"),
        ("sit", "participate"),
        ("spend", "invest"),
        ("stand", "represent"),
        ("stick", "adhere"),
        ("swim", "navigate"),
        ("take", "secure"),
        ("tell", "communicate"),
        ("think", "strategize"),
        ("throw", "project"),
        ("try", "strategically pursue"),
        ("use", "leverage"),
        ("wear", "represent"),
        ("win", "achieve"),
        ("work", "operate"),
        ("write", "author"),
    ])
}

pub fn professional_verbs() -> RuleTable {
    table(&[
        ("agree", "concur"),
        ("answer", "respond"),
        ("ask", "inquire"),
        ("begin", "commence"),
        ("break", "restructure"),
        ("build", "construct"),
        ("call", "contact"),
        ("change", "transform"),
        ("choose", "select"),
        ("close", "conclude"),
        ("come", "arrive"),
        ("compare", "evaluate"),
        ("continue", "sustain"),
        ("cut", "reduce"),
        ("decide", "determine"),
        ("describe", "characterize"),
        ("disagree", "dissent"),
        ("do", "execute"),
        ("draw", "illustrate"),
        ("drive", "operate"),
        ("end", "conclude"),
        ("explain", "articulate"),
        ("fail", "encounter challenges"),
        ("fall", "decline"),
        ("feel", "assess"),
        ("find", "identify"),
        ("finish", "complete"),
        ("fix", "resolve"),
        ("fly", "travel"),
        ("follow", "pursue"),
        ("forget", "overlook"),
        ("get", "secure"),
        ("give", "provide"),
        ("go", "proceed"),
        ("grow", "expand"),
        ("guide", "mentor"),
        ("hear", "receive"),
        ("help", "facilitate"),
        ("hold", "maintain"),
        ("hope", "anticipate"),
        ("keep", "retain"),
        ("know", "understand"),
        ("lead", "direct"),
        ("learn", "master"),
        ("like", "prefer"),
        ("listen", "attend"),
        ("look", "examine"),
        ("make", "engineer"),
        ("move", "transition"),
        ("need", "necessitate"),
        ("open", "initiate"),
        ("paint", "design"),
        ("play", "participate"),
        ("put", "position"),
        ("read", "review"),
        ("remember", "retain"),
        ("ride", "utilize"),
        ("rise", "ascend"),
        ("run", "expedite"),
        ("say", "communicate"),
        ("see", "analyze"),
        ("set", "establish"),
        ("start", "initiate"),
        ("stay", "maintain"),
        ("stop", "terminate"),
        ("study", "research"),
        ("succeed", "achieve"),
        ("swim", "navigate"),
        ("take", "acquire"),
        ("teach", "educate"),
        ("tell", "inform"),
        ("think", "strategize"),
        ("try", "endeavor"),
        ("turn", "convert"),
        ("understand", "comprehend"),
        ("use", "leverage"),
        ("walk", "proceed"),
        ("want", "require"),
        ("watch", "monitor"),
        ("win", "achieve"),
        ("wish", "aspire"),
        ("work", "operate"),
        ("write", "document"),
    ])
}

// ===== ADJECTIVES AND PHRASES =====

pub fn weak_adjectives() -> RuleTable {
    table(&[
        ("bad", "suboptimal"),
        ("basic", "foundational"),
        ("big", "substantial"),
        ("bright", "brilliant"),
        ("busy", "dynamic"),
        ("calm", "composed"),
        ("clean", "pristine"),
        ("clear", "transparent"),
        ("dangerous", "high-stakes"),
        ("early", "proactive"),
        ("easy", "efficient"),
        ("fast", "accelerated"),
        ("fine", "excellent"),
        ("fresh", "innovative"),
        ("full", "comprehensive"),
        ("good", "exceptional"),
        ("great", "outstanding"),
        ("hard", "challenging"),
        ("heavy", "substantial"),
        ("high", "elevated"),
        ("long", "comprehensive"),
        ("low", "optimized"),
        ("narrow", "focused"),
        ("new", "innovative"),
        ("nice", "superior"),
        ("okay", "proficient"),
        ("old", "established"),
        ("quick", "rapid"),
        ("right", "optimal"),
        ("rough", "challenging"),
        ("sharp", "precise"),
        ("short", "concise"),
        ("simple", "streamlined"),
        ("slow", "methodical"),
        ("small", "targeted"),
        ("smooth", "seamless"),
        ("strong", "powerful"),
        ("thin", "refined"),
        ("tired", "dedicated"),
        ("weak", "developing"),
        ("wide", "extensive"),
    ])
}

pub fn weak_phrases() -> RuleTable {
    table(&[
        ("budget conscious", "cost-effective"),
        ("client oriented", "customer-centric"),
        ("cost conscious", "budget-optimized"),
        ("customer focused", "client-centric"),
        ("dealt with", "resolved"),
        ("decided to", "elected to"),
        ("detail focused", "precision-oriented"),
        ("detail oriented", "precision-focused"),
        ("efficiency oriented", "optimization-focused"),
        ("go getter", "initiative driver"),
        ("goal oriented", "objective-driven"),
        ("growth oriented", "expansion-focused"),
        ("had to", "was required to"),
        ("hands on", "operationally engaged"),
        ("hard working", "results-driven"),
        ("in charge of", "directed"),
        ("innovation focused", "transformation-oriented"),
        ("involved in", "instrumental in"),
        ("managed to", "successfully"),
        ("needed to", "was tasked to"),
        ("people person", "relationship builder"),
        ("performance oriented", "results-optimized"),
        ("problem solver", "solution architect"),
        ("process oriented", "methodology-driven"),
        ("quality focused", "excellence-oriented"),
        ("quick learner", "adaptive professional"),
        ("responsible for", "spearheaded"),
        ("results oriented", "outcome-focused"),
        ("self motivated", "self-directed"),
        ("service oriented", "support-focused"),
        ("solution focused", "resolution-oriented"),
        ("success driven", "achievement-focused"),
        ("team leader", "team director"),
        ("team player", "collaborative leader"),
        ("took care of", "orchestrated"),
        ("tried to", "strategically"),
        ("value oriented", "impact-driven"),
        ("wanted to", "strategically pursued"),
        ("was able to", "successfully"),
        ("was part of", "contributed to"),
        ("worked on", "engineered"),
        ("worked with", "collaborated with"),
    ])
}

pub fn passive_to_active() -> RuleTable {
    table(&[
        ("was assigned to", "managed"),
        ("was asked to", "was commissioned to"),
        ("was awarded", "received recognition for"),
        ("was brought in to", "was engaged to"),
        ("was called upon to", "was summoned to"),
        ("was challenged with", "overcame"),
        ("was equipped with", "employed"),
        ("was expected to", "was positioned to"),
        ("was faced with", "confronted"),
        ("was given the opportunity", "seized the opportunity"),
        ("was given", "received"),
        ("was hired to", "was recruited to"),
        ("was involved in", "participated in"),
        ("was met with", "encountered"),
        ("was nominated for", "was recognized for"),
        ("was presented with", "addressed"),
        ("was promoted to", "advanced to"),
        ("was provided with", "utilized"),
        ("was required to", "was mandated to"),
        ("was responsible for", "directed"),
        ("was sent to", "was deployed to"),
        ("was supplied with", "leveraged"),
        ("was tasked with", "executed"),
        ("was transferred to", "transitioned to"),
    ])
}

// ===== FILLER =====

pub fn filler_words() -> Vec<String> {
    list(&[
        "very",
        "really",
        "quite",
        "basically",
        "actually",
        "obviously",
        "definitely",
        "literally",
        "just",
        "simply",
        "rather",
        "pretty",
        "fairly",
        "somewhat",
        "relatively",
        "absolutely",
        "totally",
        "completely",
        "entirely",
        "extremely",
        "incredibly",
        "amazingly",
        "surprisingly",
        "interestingly",
        "certainly",
        "surely",
        "probably",
        "possibly",
        "maybe",
        "perhaps",
        "apparently",
        "seemingly",
        "essentially",
        "fundamentally",
    ])
}

pub fn filler_phrases() -> RuleTable {
    table(&[
        ("along with", "and"),
        ("as far as", "regarding"),
        ("at the same time", "simultaneously"),
        ("at this point in time", "currently"),
        ("by and large", "generally"),
        ("due to the fact that", "because"),
        ("for the most part", "primarily"),
        ("for the purpose of", "to"),
        ("in addition to", "plus"),
        ("in order to", "to"),
        ("in terms of", "regarding"),
        ("in the case of", "for"),
        ("in the event that", "if"),
        ("in the long run", "ultimately"),
        ("in the meantime", "meanwhile"),
        ("it goes without saying", "obviously"),
        ("more or less", "approximately"),
        ("needless to say", "clearly"),
        ("to make a long story short", "briefly"),
        ("with regard to", "regarding"),
        ("without a doubt", "certainly"),
    ])
}

// ===== VOCABULARY =====

pub fn executive_vocabulary() -> RuleTable {
    table(&[
        ("ability", "strategic capability"),
        ("boss", "executive leadership"),
        ("buyer", "strategic client"),
        ("company", "organization"),
        ("coworker", "professional colleague"),
        ("customer", "valued client"),
        ("email", "professional correspondence"),
        ("folks", "stakeholders"),
        ("goal", "strategic target"),
        ("guys", "professional team"),
        ("idea", "innovative concept"),
        ("job", "executive role"),
        ("meeting", "strategic session"),
        ("method", "strategic approach"),
        ("money", "capital investment"),
        ("problem", "strategic challenge"),
        ("procedure", "operational protocol"),
        ("skill", "core competency"),
        ("strength", "competitive advantage"),
        ("stuff", "strategic materials"),
        ("task", "operational objective"),
        ("teammate", "strategic partner"),
        ("things", "operational elements"),
        ("weakness", "development opportunity"),
    ])
}

pub fn achievement_quantifiers() -> RuleTable {
    table(&[
        ("accelerated", "accelerated by 50%"),
        ("achieved", "achieved 110% of targets"),
        ("coordinated", "coordinated 20+ activities"),
        ("created", "created 10+ solutions"),
        ("delivered", "delivered 95%+ success rate"),
        ("developed", "developed 15+ initiatives"),
        ("enhanced", "enhanced by 35%"),
        ("established", "established 3+ programs"),
        ("exceeded", "exceeded goals by 25%"),
        ("expanded", "expanded by 45%"),
        ("implemented", "implemented 5+ systems"),
        ("improved", "improved by 25%"),
        ("increased", "increased by 30%"),
        ("launched", "launched 7+ initiatives"),
        ("led", "led teams of 8+ professionals"),
        ("managed", "managed 12+ projects"),
        ("optimized", "optimized by 40%"),
        ("outperformed", "outperformed benchmarks by 35%"),
        ("reduced", "reduced by 20%"),
        ("streamlined", "streamlined by 25%"),
        ("supervised", "supervised 15+ team members"),
        ("surpassed", "surpassed expectations by 30%"),
    ])
}

// ===== KEYWORDS =====

fn industry(triggers: &[&str], keywords: &[&str]) -> IndustryRule {
    IndustryRule {
        triggers: list(triggers),
        keywords: list(keywords),
    }
}

pub fn industries() -> BTreeMap<String, IndustryRule> {
    let mut map = BTreeMap::new();
    map.insert(
        "technology".to_string(),
        industry(
            &["software", "development", "programming", "code", "system", "application", "digital"],
            &[
                "full-stack development",
                "cloud computing",
                "DevOps",
                "microservices",
                "API integration",
                "machine learning",
                "artificial intelligence",
                "cybersecurity",
                "blockchain",
                "IoT",
                "agile methodology",
                "scrum",
                "CI/CD",
                "containerization",
                "scalability",
            ],
        ),
    );
    map.insert(
        "marketing".to_string(),
        industry(
            &["marketing", "promotion", "campaign", "brand", "advertising", "social media"],
            &[
                "digital marketing",
                "SEO optimization",
                "content strategy",
                "brand management",
                "conversion optimization",
                "customer acquisition",
                "marketing automation",
                "analytics",
                "social media strategy",
                "influencer marketing",
                "growth hacking",
                "A/B testing",
            ],
        ),
    );
    map.insert(
        "sales".to_string(),
        industry(
            &["sales", "revenue", "client", "customer", "target", "quota"],
            &[
                "revenue generation",
                "client relationship management",
                "sales funnel optimization",
                "lead generation",
                "account management",
                "pipeline development",
                "CRM systems",
                "consultative selling",
                "negotiation skills",
                "territory management",
            ],
        ),
    );
    map.insert(
        "finance".to_string(),
        industry(
            &["finance", "accounting", "budget", "financial", "investment", "audit"],
            &[
                "financial analysis",
                "risk management",
                "investment strategy",
                "portfolio management",
                "financial modeling",
                "regulatory compliance",
                "budgeting & forecasting",
                "cost optimization",
            ],
        ),
    );
    map.insert(
        "management".to_string(),
        industry(
            &["management", "leadership", "team", "supervision", "coordination"],
            &[
                "strategic leadership",
                "team development",
                "performance management",
                "change management",
                "organizational development",
                "cross-functional collaboration",
                "stakeholder engagement",
            ],
        ),
    );
    map
}

pub fn skill_section_headers() -> Vec<String> {
    list(&["skills", "competencies", "expertise", "proficiencies"])
}

pub fn generic_keyword_terms() -> RuleTable {
    table(&[
        ("computer skills", "{0} and {1}"),
        ("experience", "experience in {0}"),
        ("familiar with", "proficient in {2}"),
        ("knowledge", "expertise in {1}"),
        ("technical skills", "{0} expertise"),
        ("used", "implemented {1}"),
        ("worked with", "leveraged {0}"),
    ])
}

pub fn technical_boosts() -> RuleTable {
    table(&[
        ("algorithm", "algorithm optimization & design patterns"),
        ("api", "RESTful API development & integration"),
        ("application", "application development & maintenance"),
        ("automation", "process automation & CI/CD pipelines"),
        ("coding", "clean code architecture"),
        ("database", "database optimization & management"),
        ("development", "agile development methodologies"),
        ("framework", "modern framework implementation"),
        ("network", "network security & infrastructure"),
        ("platform", "platform engineering & DevOps"),
        ("programming", "full-stack programming"),
        ("server", "server architecture & deployment"),
        ("software", "enterprise software solutions"),
        ("system", "system integration & scalability"),
        ("technology", "cutting-edge technology stack"),
    ])
}

pub fn business_boosts() -> RuleTable {
    table(&[
        ("analytics", "business analytics & data-driven insights"),
        ("business", "business development & growth strategy"),
        ("client", "client relationship management & satisfaction"),
        ("compliance", "regulatory compliance & risk management"),
        ("customer", "customer experience & retention strategies"),
        ("efficiency", "operational efficiency & cost optimization"),
        ("finance", "financial planning & budget optimization"),
        ("growth", "sustainable growth & market expansion"),
        ("innovation", "innovation management & digital transformation"),
        ("management", "strategic management & operational excellence"),
        ("marketing", "integrated marketing & brand strategy"),
        ("operations", "operational efficiency & process optimization"),
        ("performance", "performance optimization & KPI management"),
        ("process", "process improvement & workflow optimization"),
        ("project", "project management & delivery excellence"),
        ("quality", "quality assurance & continuous improvement"),
        ("revenue", "revenue growth & profitability optimization"),
        ("sales", "revenue optimization & client acquisition"),
        ("strategy", "business strategy & competitive positioning"),
        ("team", "team leadership & performance management"),
    ])
}

pub fn soft_skill_boosts() -> RuleTable {
    table(&[
        ("adaptability", "change management & organizational agility"),
        ("analytical skills", "analytical thinking & data-driven decision making"),
        ("communication skills", "executive communication & stakeholder engagement"),
        ("creative skills", "creative problem-solving & innovation management"),
        ("dedication", "committed excellence & results-driven performance"),
        ("empathy", "emotional intelligence & inclusive leadership"),
        ("enthusiasm", "passionate engagement & positive influence"),
        ("flexibility", "adaptive leadership & situational management"),
        ("initiative", "proactive leadership & self-directed execution"),
        ("integrity", "ethical leadership & principled decision-making"),
        ("interpersonal skills", "relationship building & emotional intelligence"),
        ("leadership skills", "transformational leadership & team empowerment"),
        ("motivation", "self-motivation & team inspiration"),
        ("organizational skills", "organizational excellence & workflow optimization"),
        ("patience", "strategic patience & thoughtful execution"),
        ("problem-solving skills", "strategic problem-solving & innovative solutions"),
        ("professionalism", "executive presence & professional excellence"),
        ("reliability", "dependable execution & consistent performance"),
        ("teamwork skills", "collaborative leadership & cross-functional teamwork"),
        ("time management skills", "priority management & deadline optimization"),
    ])
}

pub fn trending_keywords() -> BTreeMap<String, Vec<String>> {
    [
        ("agile methodology", &["agile", "scrum", "iterative", "flexible"][..]),
        ("artificial intelligence", &["ai", "automation", "intelligent", "smart"]),
        ("cloud computing", &["cloud", "infrastructure", "scalable", "platform"]),
        ("customer experience", &["customer", "experience", "satisfaction", "service"]),
        ("cybersecurity", &["security", "protection", "risk", "compliance"]),
        ("data analytics", &["data", "analytics", "insights", "metrics"]),
        ("digital transformation", &["digital", "transformation", "technology", "innovation"]),
        ("machine learning", &["learning", "prediction", "algorithm", "intelligent"]),
        ("remote work", &["remote", "virtual", "distributed", "hybrid"]),
        ("sustainability", &["environment", "green", "sustainable", "eco"]),
    ]
    .iter()
    .map(|(keyword, triggers)| (keyword.to_string(), list(triggers)))
    .collect()
}

pub fn trending_injection_points() -> Vec<String> {
    list(&[
        "experience in", "expertise in", "skilled in", "proficient in", "knowledge of",
        "familiar with", "worked with", "involved in",
    ])
}

pub fn skill_upgrades() -> RuleTable {
    table(&[
        ("adaptability", "change management & organizational adaptability"),
        ("attention to detail", "quality assurance & precision-focused execution"),
        ("collaboration", "cross-departmental collaboration & partnership development"),
        ("communication", "stakeholder communication & presentation skills"),
        ("creativity", "innovative problem solving & creative strategy development"),
        ("critical thinking", "analytical reasoning & strategic evaluation"),
        ("customer service", "customer relationship management & satisfaction optimization"),
        ("decision making", "data-driven decision making & strategic analysis"),
        ("interpersonal", "stakeholder relationship building & team dynamics"),
        ("leadership", "strategic leadership & team development"),
        ("multitasking", "parallel project management & resource optimization"),
        ("negotiation", "contract negotiation & vendor management"),
        ("problem solving", "analytical problem-solving & root cause analysis"),
        ("teamwork", "cross-functional collaboration & team synergy"),
        ("time management", "priority management & deadline optimization"),
    ])
}

// ===== GRAMMAR =====

pub fn spelling() -> RuleTable {
    table(&[
        // professional misspellings
        ("accomodate", "accommodate"),
        ("acheived", "achieved"),
        ("acheivement", "achievement"),
        ("alot", "a lot"),
        ("anual", "annual"),
        ("begining", "beginning"),
        ("buisness", "business"),
        ("calender", "calendar"),
        ("comercial", "commercial"),
        ("definately", "definitely"),
        ("developement", "development"),
        ("embarass", "embarrass"),
        ("existance", "existence"),
        ("expereince", "experience"),
        ("finacial", "financial"),
        ("independant", "independent"),
        ("knowlege", "knowledge"),
        ("maintainance", "maintenance"),
        ("managment", "management"),
        ("neccessary", "necessary"),
        ("occassion", "occasion"),
        ("occured", "occurred"),
        ("priviledge", "privilege"),
        ("proffesional", "professional"),
        ("publically", "publicly"),
        ("recieve", "receive"),
        ("recieved", "received"),
        ("recomend", "recommend"),
        ("recomendation", "recommendation"),
        ("refered", "referred"),
        ("relavant", "relevant"),
        ("relevence", "relevance"),
        ("responsibilty", "responsibility"),
        ("seperate", "separate"),
        ("seperately", "separately"),
        ("succesful", "successful"),
        ("sucessful", "successful"),
        ("tommorow", "tomorrow"),
        ("unfortunatly", "unfortunately"),
        ("untill", "until"),
        ("witheld", "withheld"),
        ("writting", "writing"),
        ("yeild", "yield"),
        // British → American
        ("analysed", "analyzed"),
        ("categorised", "categorized"),
        ("centralised", "centralized"),
        ("characterised", "characterized"),
        ("customised", "customized"),
        ("emphasised", "emphasized"),
        ("finalised", "finalized"),
        ("localised", "localized"),
        ("maximised", "maximized"),
        ("minimised", "minimized"),
        ("modernised", "modernized"),
        ("optimised", "optimized"),
        ("organised", "organized"),
        ("prioritised", "prioritized"),
        ("realised", "realized"),
        ("recognised", "recognized"),
        ("specialised", "specialized"),
        ("standardised", "standardized"),
        ("summarised", "summarized"),
        ("synchronised", "synchronized"),
        ("utilised", "utilized"),
    ])
}

pub fn spacing_fixes() -> Vec<(String, String)> {
    [
        ("  ", " "),
        (" .", "."),
        (" ,", ","),
        (" :", ":"),
        (" ;", ";"),
        ("( ", "("),
        (" )", ")"),
        ("..", "."),
        (",,", ","),
        ("!!", "!"),
        ("??", "?"),
    ]
    .iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect()
}

pub fn bullet_markers() -> Vec<String> {
    list(&["•", "-", "*", "·"])
}

pub fn proper_nouns() -> RuleTable {
    table(&[
        ("adobe", "Adobe"),
        ("github", "GitHub"),
        ("google", "Google"),
        ("illustrator", "Illustrator"),
        ("javascript", "JavaScript"),
        ("linkedin", "LinkedIn"),
        ("microsoft", "Microsoft"),
        ("mongodb", "MongoDB"),
        ("mysql", "MySQL"),
        ("photoshop", "Photoshop"),
        ("postgresql", "PostgreSQL"),
        ("powerpoint", "PowerPoint"),
        ("python", "Python"),
        ("salesforce", "Salesforce"),
    ])
}

// ===== AGREEMENT AND TENSE =====

pub fn agreement_fixes() -> RuleTable {
    table(&[
        ("anybody are", "anybody is"),
        ("criteria is", "criteria are"),
        ("data is", "data are"),
        ("each of them are", "each of them is"),
        ("everyone are", "everyone is"),
        ("media is", "media are"),
        ("nobody are", "nobody is"),
        ("one of them are", "one of them is"),
        ("somebody are", "somebody is"),
        ("there is many", "there are many"),
        ("there is multiple", "there are multiple"),
        ("there is several", "there are several"),
    ])
}

pub fn tense_fixes() -> RuleTable {
    table(&[
        ("accomplish", "accomplished"),
        ("achieve", "achieved"),
        ("analyze", "analyzed"),
        ("build", "built"),
        ("collaborate", "collaborated"),
        ("communicate", "communicated"),
        ("complete", "completed"),
        ("coordinate", "coordinated"),
        ("create", "created"),
        ("deliver", "delivered"),
        ("design", "designed"),
        ("develop", "developed"),
        ("enhance", "enhanced"),
        ("establish", "established"),
        ("execute", "executed"),
        ("implement", "implemented"),
        ("improve", "improved"),
        ("increase", "increased"),
        ("lead", "led"),
        ("maintain", "maintained"),
        ("manage", "managed"),
        ("mentor", "mentored"),
        ("optimize", "optimized"),
        ("organize", "organized"),
        ("oversee", "oversaw"),
        ("plan", "planned"),
        ("present", "presented"),
        ("reduce", "reduced"),
        ("research", "researched"),
        ("streamline", "streamlined"),
        ("supervise", "supervised"),
        ("support", "supported"),
        ("train", "trained"),
    ])
}

pub fn silent_h_words() -> Vec<String> {
    list(&["heir", "honest", "honor", "honour", "hour"])
}

pub fn consonant_sound_prefixes() -> Vec<String> {
    list(&["eu", "one", "once", "uni", "usa", "use", "usu", "uti"])
}

pub fn abbreviations() -> Vec<String> {
    list(&[
        "e.g.", "i.e.", "etc.", "vs.", "approx.", "incl.", "dept.", "est.", "no.", "mr.",
        "mrs.", "ms.", "dr.", "jr.", "sr.", "inc.", "ltd.", "co.", "corp.",
    ])
}

pub fn split_connectors() -> Vec<String> {
    list(&[
        ", and ", ", but ", ", or ", ", so ", ", yet ", " and ", " but ", " which ", " while ",
        " where ", "; ",
    ])
}

// ===== STRUCTURE =====

pub fn achievement_markers() -> Vec<String> {
    list(&["responsible", "managed", "developed", "created", "led", "achieved", "improved"])
}

pub fn section_headers() -> BTreeMap<String, Vec<String>> {
    [
        ("ACHIEVEMENTS", &["achievement", "award", "recognition", "accomplishment"][..]),
        ("CORE COMPETENCIES", &["skills", "competencies", "proficient", "expertise"]),
        ("EDUCATION", &["education", "degree", "university", "college", "graduated"]),
        ("PROFESSIONAL EXPERIENCE", &["experience", "work", "employment", "position", "job"]),
        ("PROFILE", &["profile", "summary", "objective", "about"]),
    ]
    .iter()
    .map(|(header, words)| (header.to_string(), list(words)))
    .collect()
}

// ===== LEXICON =====

pub fn extra_verbs() -> Vec<String> {
    list(&[
        "achieve", "analyze", "build", "coordinate", "create", "deliver", "design", "develop",
        "enhance", "establish", "implement", "improve", "increase", "launch", "manage",
        "mentor", "negotiate", "organize", "oversee", "plan", "present", "reduce", "streamline",
        "supervise", "support", "train",
    ])
}

pub fn extra_adjectives() -> Vec<String> {
    list(&[
        "excellent", "amazing", "various", "several", "responsible", "strategic", "effective",
        "successful", "senior", "junior", "technical", "professional",
    ])
}

pub fn irregular_forms() -> RuleTable {
    table(&[
        ("are", "be"),
        ("ate", "eat"),
        ("been", "be"),
        ("began", "begin"),
        ("begun", "begin"),
        ("bought", "buy"),
        ("broke", "break"),
        ("broken", "break"),
        ("brought", "bring"),
        ("built", "build"),
        ("came", "come"),
        ("chose", "choose"),
        ("chosen", "choose"),
        ("dealt", "deal"),
        ("did", "do"),
        ("does", "do"),
        ("done", "do"),
        ("drew", "draw"),
        ("drawn", "draw"),
        ("driven", "drive"),
        ("drove", "drive"),
        ("fell", "fall"),
        ("felt", "feel"),
        ("flew", "fly"),
        ("forgot", "forget"),
        ("found", "find"),
        ("gave", "give"),
        ("given", "give"),
        ("gone", "go"),
        ("got", "get"),
        ("gotten", "get"),
        ("grew", "grow"),
        ("grown", "grow"),
        ("had", "have"),
        ("has", "have"),
        ("heard", "hear"),
        ("held", "hold"),
        ("is", "be"),
        ("kept", "keep"),
        ("knew", "know"),
        ("known", "know"),
        ("led", "lead"),
        ("left", "leave"),
        ("lost", "lose"),
        ("made", "make"),
        ("met", "meet"),
        ("oversaw", "oversee"),
        ("paid", "pay"),
        ("ran", "run"),
        ("rode", "ride"),
        ("rose", "rise"),
        ("said", "say"),
        ("sat", "sit"),
        ("saw", "see"),
        ("seen", "see"),
        ("sent", "send"),
        ("shot", "shoot"),
        ("sold", "sell"),
        ("spent", "spend"),
        ("stood", "stand"),
        ("stuck", "stick"),
        ("swam", "swim"),
        ("taken", "take"),
        ("taught", "teach"),
        ("thought", "think"),
        ("threw", "throw"),
        ("told", "tell"),
        ("took", "take"),
        ("understood", "understand"),
        ("was", "be"),
        ("went", "go"),
        ("were", "be"),
        ("won", "win"),
        ("wore", "wear"),
        ("written", "write"),
        ("wrote", "write"),
    ])
}

pub fn determiners() -> Vec<String> {
    list(&[
        "a", "an", "the", "my", "our", "your", "his", "her", "their", "its", "this", "that",
        "these", "those", "each", "every", "some", "any", "no",
    ])
}

// ===== ANALYSIS =====

pub fn weak_words() -> Vec<String> {
    list(&[
        "good", "great", "nice", "excellent", "amazing", "best", "better", "well", "very",
        "really", "thing", "things", "stuff", "etc", "helped", "handled", "responsible",
        "responsible for", "various", "several", "many", "some", "much", "a lot", "kind of",
        "sort of", "type of", "worked on", "worked with", "was part of", "assisted",
        "assisted with", "assisted in",
    ])
}

pub fn action_verbs() -> Vec<String> {
    list(&[
        "achieved", "improved", "trained", "managed", "created", "reduced", "increased",
        "negotiated", "launched", "developed", "designed", "implemented", "established",
        "coordinated", "led", "presented", "organized", "restructured", "delivered",
        "generated", "streamlined", "decreased", "enhanced", "expanded", "optimized",
        "secured", "integrated", "innovated", "authored", "adapted", "resolved", "revitalized",
        "mentored", "motivated", "transformed", "spearheaded", "orchestrated",
    ])
}

pub fn keyword_catalogue() -> BTreeMap<String, Vec<String>> {
    let mut map = BTreeMap::new();
    map.insert(
        "technology".to_string(),
        list(&[
            "python", "java", "javascript", "react", "node", "sql", "nosql", "aws", "azure",
            "cloud", "docker", "kubernetes", "agile", "scrum", "rest api", "microservices",
            "devops", "ci/cd", "git", "machine learning", "artificial intelligence",
            "data science", "big data", "blockchain", "frontend", "backend", "full stack",
            "mobile", "android", "ios",
        ]),
    );
    map.insert(
        "business".to_string(),
        list(&[
            "management", "leadership", "strategy", "analytics", "operations", "marketing",
            "sales", "finance", "accounting", "hr", "human resources", "consulting",
            "project management", "business development", "client relations", "stakeholder",
            "roi", "kpi", "metrics", "growth", "revenue", "profit", "market analysis",
            "strategic planning", "budget", "forecasting",
        ]),
    );
    map.insert(
        "general".to_string(),
        list(&[
            "team", "leadership", "communication", "collaboration", "problem-solving",
            "analytical", "detail-oriented", "project management", "time management",
            "critical thinking", "organization", "planning", "research", "writing",
            "interpersonal", "multitasking", "decision-making", "presentation", "negotiation",
            "customer service", "creativity",
        ]),
    );
    map
}

pub fn stop_words() -> Vec<String> {
    list(&[
        "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be",
        "been", "but", "by", "for", "from", "had", "has", "have", "he", "her", "his", "i",
        "in", "into", "is", "it", "its", "me", "my", "not", "of", "on", "or", "our", "she",
        "so", "than", "that", "the", "their", "them", "then", "there", "these", "they",
        "this", "to", "up", "was", "we", "were", "which", "while", "who", "will", "with",
        "you", "your",
    ])
}
