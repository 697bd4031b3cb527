#![allow(dead_code)]

use std::sync::Arc;

use licfp::{CanonicalizeConfig, LicenseEntry, Normalizer, StaticRegistry};

pub const MIT_TEMPLATE: &str = "MIT License

Copyright (c) [year] [fullname]

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
";

pub const BSD_3_CLAUSE_TEMPLATE: &str = "BSD 3-Clause License

Copyright (c) [year], [fullname]
All rights reserved.

Redistribution and use in source and binary forms, with or without
modification, are permitted provided that the following conditions are met:

1. Redistributions of source code must retain the above copyright notice, this
   list of conditions and the following disclaimer.

2. Redistributions in binary form must reproduce the above copyright notice,
   this list of conditions and the following disclaimer in the documentation
   and/or other materials provided with the distribution.

3. Neither the name of the copyright holder nor the names of its
   contributors may be used to endorse or promote products derived from
   this software without specific prior written permission.
";

pub fn fixture_registry() -> StaticRegistry {
    StaticRegistry::new(vec![
        LicenseEntry::new("mit", "MIT License", "MIT License"),
        LicenseEntry::new("apache-2.0", "Apache License 2.0", "Apache License"),
        LicenseEntry::new(
            "gpl-3.0",
            "GNU General Public License v3.0",
            "GNU General Public License",
        ),
        LicenseEntry::new(
            "bsd-3-clause",
            "BSD 3-Clause License",
            "BSD 3-Clause License",
        ),
        LicenseEntry::new("mit-0", "MIT No Attribution", "MIT No Attribution").hidden(),
        LicenseEntry::new("other", "Other", "Other").pseudo(),
    ])
}

pub fn fixture_normalizer() -> Arc<Normalizer> {
    Arc::new(
        Normalizer::new(&fixture_registry(), CanonicalizeConfig::default())
            .expect("fixture normalizer"),
    )
}
